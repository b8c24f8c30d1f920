//! The group the API key belongs to.

use chrono::{DateTime, Utc};
use increase_core::{Extras, Field, IncreaseError, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum GroupType {
        Group => "group",
    }
}

string_enum! {
    pub enum ActivationStatus {
        /// The group cannot move money yet.
        Unactivated => "unactivated",
        Activated => "activated",
    }
}

string_enum! {
    pub enum AchDebitStatus {
        Disabled => "disabled",
        Enabled => "enabled",
    }
}

/// A group is the top-level container for an Increase customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub activation_status: Field<ActivationStatus>,
    /// Whether outgoing ACH debits are allowed.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub ach_debit_status: Field<AchDebitStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<GroupType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(Group, "group");

service! {
    /// `/groups`
    GroupsService
}

impl<T: Transport> GroupsService<T> {
    /// Returns details of the group the API key belongs to.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve_details(&self) -> Result<Group, IncreaseError> {
        self.client.get("groups/current", &self.options).await
    }
}
