//! Card profiles control how cards look in digital wallets.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::InFilter;

const PATH: &str = "card_profiles";

string_enum! {
    pub enum CardProfileType {
        CardProfile => "card_profile",
    }
}

string_enum! {
    pub enum CardProfileStatus {
        /// Awaiting review by the card networks.
        Pending => "pending",
        Rejected => "rejected",
        Active => "active",
        Archived => "archived",
    }
}

/// An RGB color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextColor {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub red: Field<u8>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub green: Field<u8>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub blue: Field<u8>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// How a card is presented in Apple Pay and Google Pay.
///
/// Used both on the returned profile and as the create parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalWallets {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub text_color: Field<TextColor>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub issuer_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub card_description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub contact_website: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub contact_email: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub contact_phone: Field<String>,
    /// A file uploaded with purpose `digital_wallet_artwork`.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub background_image_file_id: Field<String>,
    /// A file uploaded with purpose `digital_wallet_app_icon`.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub app_icon_file_id: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardProfile {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<CardProfileStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub digital_wallets: Field<DigitalWallets>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<CardProfileType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(CardProfile, "card_profile");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardProfileCreateParams {
    /// Internal description, not shown to cardholders.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub digital_wallets: Field<DigitalWallets>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardProfileListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InFilter<CardProfileStatus>>,
}

service! {
    /// `/card_profiles`
    CardProfilesService
}

impl<T: Transport> CardProfilesService<T> {
    /// Creates a profile. New profiles start out `pending`.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(&self, params: &CardProfileCreateParams) -> Result<CardProfile, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, card_profile_id: &str) -> Result<CardProfile, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(card_profile_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &CardProfileListParams,
    ) -> Result<Page<CardProfile, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &CardProfileListParams,
    ) -> Result<Pager<CardProfile, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }

    /// Archives a profile so it can no longer be assigned to cards.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn archive(&self, card_profile_id: &str) -> Result<CardProfile, IncreaseError> {
        self.client
            .post_action(&format!("{PATH}/{}/archive", path_segment(card_profile_id)?), &self.options)
            .await
    }
}
