//! Disputes raised against card transactions.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{InFilter, TimeRange};

const PATH: &str = "card_disputes";

string_enum! {
    pub enum CardDisputeType {
        CardDispute => "card_dispute",
    }
}

string_enum! {
    pub enum CardDisputeStatus {
        /// Under review by Increase.
        PendingReviewing => "pending_reviewing",
        Accepted => "accepted",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDisputeAcceptance {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub accepted_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub card_dispute_id: Field<String>,
    /// The transaction crediting the disputed amount back.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub transaction_id: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDisputeRejection {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub explanation: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub rejected_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub card_dispute_id: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDispute {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub explanation: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<CardDisputeStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub disputed_transaction_id: Field<String>,
    /// Set when the dispute was accepted.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub acceptance: Field<CardDisputeAcceptance>,
    /// Set when the dispute was rejected.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub rejection: Field<CardDisputeRejection>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<CardDisputeType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(CardDispute, "card_dispute");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardDisputeCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub disputed_transaction_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub explanation: Field<String>,
}

impl CardDisputeCreateParams {
    pub fn new(disputed_transaction_id: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            disputed_transaction_id: Field::Present(disputed_transaction_id.into()),
            explanation: Field::Present(explanation.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardDisputeListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InFilter<CardDisputeStatus>>,
}

service! {
    /// `/card_disputes`
    CardDisputesService
}

impl<T: Transport> CardDisputesService<T> {
    /// Opens a dispute on a card transaction.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(&self, params: &CardDisputeCreateParams) -> Result<CardDispute, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, card_dispute_id: &str) -> Result<CardDispute, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(card_dispute_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &CardDisputeListParams,
    ) -> Result<Page<CardDispute, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &CardDisputeListParams,
    ) -> Result<Pager<CardDispute, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
