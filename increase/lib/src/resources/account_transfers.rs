//! Transfers between two accounts in the same group.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{Currency, TimeRange};

const PATH: &str = "account_transfers";

string_enum! {
    pub enum AccountTransferType {
        AccountTransfer => "account_transfer",
    }
}

string_enum! {
    pub enum AccountTransferNetwork {
        Account => "account",
    }
}

string_enum! {
    pub enum AccountTransferStatus {
        PendingSubmission => "pending_submission",
        /// Waiting for approval in the dashboard or through [`AccountTransfersService::approve`].
        PendingApproval => "pending_approval",
        Canceled => "canceled",
        RequiresAttention => "requires_attention",
        FlaggedByOperator => "flagged_by_operator",
        Complete => "complete",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountTransferApproval {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub approved_at: Field<DateTime<Utc>>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountTransferCancellation {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub canceled_at: Field<DateTime<Utc>>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// A movement of funds between two of the group's accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountTransfer {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    /// Amount in the minor unit of `currency`.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub destination_account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub destination_transaction_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub network: Field<AccountTransferNetwork>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<AccountTransferStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub template_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub transaction_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub approval: Field<AccountTransferApproval>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub cancellation: Field<AccountTransferCancellation>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<AccountTransferType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(AccountTransfer, "account_transfer");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountTransferCreateParams {
    /// The account the funds leave.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub destination_account_id: Field<String>,
    /// Hold the transfer in `pending_approval` until approved.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub require_approval: Field<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountTransferListParams {
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
    /// `/account_transfers`
    AccountTransfersService
}

impl<T: Transport> AccountTransfersService<T> {
    /// Creates a transfer.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(
        &self,
        params: &AccountTransferCreateParams,
    ) -> Result<AccountTransfer, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// Retrieves a transfer by ID.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, transfer_id: &str) -> Result<AccountTransfer, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(transfer_id)?), &self.options)
            .await
    }

    /// Fetches the first page of transfers.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &AccountTransferListParams,
    ) -> Result<Page<AccountTransfer, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// Walks every transfer lazily.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &AccountTransferListParams,
    ) -> Result<Pager<AccountTransfer, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }

    /// Approves a transfer waiting in `pending_approval`.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn approve(&self, transfer_id: &str) -> Result<AccountTransfer, IncreaseError> {
        self.client
            .post_action(&format!("{PATH}/{}/approve", path_segment(transfer_id)?), &self.options)
            .await
    }

    /// Cancels a transfer waiting in `pending_approval`.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn cancel(&self, transfer_id: &str) -> Result<AccountTransfer, IncreaseError> {
        self.client
            .post_action(&format!("{PATH}/{}/cancel", path_segment(transfer_id)?), &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_nested_approval() {
        let transfer: AccountTransfer = serde_json::from_value(json!({
            "id": "account_transfer_7k9qe1ysdgqztnt63l7n",
            "amount": 100,
            "currency": "USD",
            "status": "complete",
            "network": "account",
            "approval": { "approved_at": "2020-01-31T23:59:59Z", "approved_by": null },
            "cancellation": null,
            "type": "account_transfer"
        }))
        .unwrap();
        assert_eq!(transfer.status, Field::Present(AccountTransferStatus::Complete));
        let approval = transfer.approval.value().unwrap();
        assert!(approval.approved_at.is_present());
        assert!(approval.extras.contains_key("approved_by"));
        assert!(transfer.cancellation.is_null());
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let transfer: AccountTransfer =
            serde_json::from_value(json!({ "status": "returned" })).unwrap();
        let status = transfer.status.value().unwrap();
        assert!(status.is_unknown());
        assert_eq!(status.as_str(), "returned");
    }

    #[test]
    fn test_create_params() {
        let params = AccountTransferCreateParams {
            account_id: "account_in71c4amph0vgo2qllky".into(),
            amount: 100.into(),
            description: "Creating liquidity".into(),
            destination_account_id: "account_uf16sut2ct5bevmq3eh".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(params).unwrap();
        assert_eq!(body["amount"], json!(100));
        assert!(body.get("require_approval").is_none());
    }
}
