//! Checks printed and mailed on behalf of an account.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{Currency, TimeRange};

const PATH: &str = "check_transfers";

string_enum! {
    pub enum CheckTransferType {
        CheckTransfer => "check_transfer",
    }
}

string_enum! {
    pub enum CheckTransferStatus {
        PendingApproval => "pending_approval",
        PendingSubmission => "pending_submission",
        Submitted => "submitted",
        PendingMailing => "pending_mailing",
        Mailed => "mailed",
        Canceled => "canceled",
        Deposited => "deposited",
        Stopped => "stopped",
        Rejected => "rejected",
        RequiresAttention => "requires_attention",
        Returned => "returned",
    }
}

string_enum! {
    pub enum StopPaymentRequestType {
        CheckTransferStopPaymentRequest => "check_transfer_stop_payment_request",
    }
}

/// Present once payment on the check has been stopped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopPaymentRequest {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub transfer_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub transaction_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub requested_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<StopPaymentRequestType>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// A mailing address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnAddress {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub city: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub zip: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckTransfer {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub check_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub recipient_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub message: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_city: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_zip: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub return_address: Field<ReturnAddress>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<CheckTransferStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub mailed_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub transaction_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub stop_payment_request: Field<StopPaymentRequest>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<CheckTransferType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(CheckTransfer, "check_transfer");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckTransferCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    /// Amount in cents.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub recipient_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub message: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_city: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address_zip: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub return_address: Field<ReturnAddress>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub require_approval: Field<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckTransferListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/check_transfers`
    CheckTransfersService
}

impl<T: Transport> CheckTransfersService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(&self, params: &CheckTransferCreateParams) -> Result<CheckTransfer, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, check_transfer_id: &str) -> Result<CheckTransfer, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(check_transfer_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &CheckTransferListParams,
    ) -> Result<Page<CheckTransfer, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &CheckTransferListParams,
    ) -> Result<Pager<CheckTransfer, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }

    /// Requests a stop payment on a mailed check.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn stop_payment(&self, check_transfer_id: &str) -> Result<CheckTransfer, IncreaseError> {
        self.client
            .post_action(&format!("{PATH}/{}/stop_payment", path_segment(check_transfer_id)?), &self.options)
            .await
    }
}
