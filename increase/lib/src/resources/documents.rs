//! Documents Increase produces for a group or one of its entities.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{InFilter, TimeRange};

const PATH: &str = "documents";

string_enum! {
    pub enum DocumentType {
        Document => "document",
    }
}

string_enum! {
    /// What a document is about.
    pub enum DocumentCategory {
        AccountOpeningDisclosures => "account_opening_disclosures",
        AntiMoneyLaunderingPolicy => "anti_money_laundering_policy",
        AntiMoneyLaunderingProcedures => "anti_money_laundering_procedures",
        AuditReport => "audit_report",
        BackgroundChecks => "background_checks",
        BusinessContinuityPlan => "business_continuity_plan",
        CollectionsPolicy => "collections_policy",
        ComplaintsPolicy => "complaints_policy",
        ComplaintReport => "complaint_report",
        ComplianceReport => "compliance_report",
        ComplianceStaffingPlan => "compliance_staffing_plan",
        ComplianceManagementSystemPolicy => "compliance_management_system_policy",
        ConsumerPrivacyNotice => "consumer_privacy_notice",
        ConsumerProtectionPolicy => "consumer_protection_policy",
        CorporateFormationDocument => "corporate_formation_document",
        CreditMonitoringReport => "credit_monitoring_report",
        CustomerInformationProgramPolicy => "customer_information_program_policy",
        ElectronicFundsTranferActPolicy => "electronic_funds_tranfer_act_policy",
        EmployeeOverview => "employee_overview",
        EndUserTermsOfService => "end_user_terms_of_service",
        ESignPolicy => "e_sign_policy",
        FinancialStatement => "financial_statement",
        Form1099Int => "form_1099_int",
        FraudPreventionPolicy => "fraud_prevention_policy",
        FundsAvailabilityPolicy => "funds_availability_policy",
        FundsAvailabilityDisclosure => "funds_availability_disclosure",
        FundsFlowDiagram => "funds_flow_diagram",
        GrammLeachBlileyActPolicy => "gramm_leach_bliley_act_policy",
        InformationSecurityPolicy => "information_security_policy",
        InsurancePolicy => "insurance_policy",
        InvestorPresentation => "investor_presentation",
        LoanApplicationProcessingPolicy => "loan_application_processing_policy",
        ManagementBiography => "management_biography",
        MarketingAndAdvertisingPolicy => "marketing_and_advertising_policy",
        NetworkSecurityDiagram => "network_security_diagram",
        OnboardingQuestionnaire => "onboarding_questionnaire",
        PenetrationTestReport => "penetration_test_report",
        ProgramRiskAssessment => "program_risk_assessment",
        SecurityAuditReport => "security_audit_report",
        ServicingPolicy => "servicing_policy",
        TransactionMonitoringReport => "transaction_monitoring_report",
        TruthInSavingsActPolicy => "truth_in_savings_act_policy",
        UnderwritingPolicy => "underwriting_policy",
        VendorList => "vendor_list",
        VendorManagementPolicy => "vendor_management_policy",
        VendorRiskManagementReport => "vendor_risk_management_report",
        VolumeForecast => "volume_forecast",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub category: Field<DocumentCategory>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    /// `null` for documents about the group as a whole.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub entity_id: Field<String>,
    /// The file holding the document's content.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub file_id: Field<String>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<DocumentType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(Document, "document");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<InFilter<DocumentCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/documents`
    DocumentsService
}

impl<T: Transport> DocumentsService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, document_id: &str) -> Result<Document, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(document_id)?), &self.options)
            .await
    }

    /// Fetches the first page of documents.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(&self, params: &DocumentListParams) -> Result<Page<Document, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &DocumentListParams,
    ) -> Result<Pager<Document, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
