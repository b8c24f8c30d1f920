//! Tokens provisioned for cards in Apple Pay and Google Pay.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::TimeRange;

const PATH: &str = "digital_wallet_tokens";

string_enum! {
    pub enum DigitalWalletTokenType {
        DigitalWalletToken => "digital_wallet_token",
    }
}

string_enum! {
    pub enum DigitalWalletTokenStatus {
        /// Can be used for purchases.
        Active => "active",
        /// Not yet activated.
        Inactive => "inactive",
        /// Temporarily paused.
        Suspended => "suspended",
        /// Permanently deactivated.
        Deactivated => "deactivated",
    }
}

string_enum! {
    pub enum TokenRequestor {
        ApplePay => "apple_pay",
        GooglePay => "google_pay",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalWalletToken {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub card_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<DigitalWalletTokenStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub token_requestor: Field<TokenRequestor>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<DigitalWalletTokenType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(DigitalWalletToken, "digital_wallet_token");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DigitalWalletTokenListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/digital_wallet_tokens`
    DigitalWalletTokensService
}

impl<T: Transport> DigitalWalletTokensService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, token_id: &str) -> Result<DigitalWalletToken, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(token_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &DigitalWalletTokenListParams,
    ) -> Result<Page<DigitalWalletToken, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &DigitalWalletTokenListParams,
    ) -> Result<Pager<DigitalWalletToken, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
