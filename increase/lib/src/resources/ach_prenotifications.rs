//! ACH prenotifications: zero-dollar entries that verify an account before
//! real transfers are sent to it.

use chrono::{DateTime, NaiveDate, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::TimeRange;

const PATH: &str = "ach_prenotifications";

string_enum! {
    pub enum AchPrenotificationType {
        AchPrenotification => "ach_prenotification",
    }
}

string_enum! {
    pub enum CreditDebitIndicator {
        Credit => "credit",
        Debit => "debit",
    }
}

string_enum! {
    pub enum AchPrenotificationStatus {
        PendingSubmitting => "pending_submitting",
        RequiresAttention => "requires_attention",
        Returned => "returned",
        Submitted => "submitted",
    }
}

string_enum! {
    /// NACHA standard entry class of the prenotification.
    pub enum StandardEntryClassCode {
        CorporateCreditOrDebit => "corporate_credit_or_debit",
        PrearrangedPaymentsAndDeposit => "prearranged_payments_and_deposit",
        InternetInitiated => "internet_initiated",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrenotificationReturn {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub return_reason_code: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchPrenotification {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub addendum: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_descriptive_date: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_discretionary_data: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_entry_description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub credit_debit_indicator: Field<CreditDebitIndicator>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub effective_date: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub routing_number: Field<String>,
    /// Set once the receiving bank returns the prenotification.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub prenotification_return: Field<PrenotificationReturn>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<AchPrenotificationStatus>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<AchPrenotificationType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(AchPrenotification, "ach_prenotification");

/// Body of `POST /ach_prenotifications`. `account_number` and
/// `routing_number` are required by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AchPrenotificationCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub routing_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub addendum: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_descriptive_date: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_discretionary_data: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_entry_description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub credit_debit_indicator: Field<CreditDebitIndicator>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub effective_date: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub individual_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub individual_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub standard_entry_class_code: Field<StandardEntryClassCode>,
}

impl AchPrenotificationCreateParams {
    pub fn new(account_number: impl Into<String>, routing_number: impl Into<String>) -> Self {
        Self {
            account_number: Field::Present(account_number.into()),
            routing_number: Field::Present(routing_number.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AchPrenotificationListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/ach_prenotifications`
    AchPrenotificationsService
}

impl<T: Transport> AchPrenotificationsService<T> {
    /// Creates a prenotification.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(
        &self,
        params: &AchPrenotificationCreateParams,
    ) -> Result<AchPrenotification, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, prenotification_id: &str) -> Result<AchPrenotification, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(prenotification_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &AchPrenotificationListParams,
    ) -> Result<Page<AchPrenotification, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &AchPrenotificationListParams,
    ) -> Result<Pager<AchPrenotification, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
