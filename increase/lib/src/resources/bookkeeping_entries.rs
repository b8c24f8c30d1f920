//! Entries of the double-entry bookkeeping ledger.

use chrono::{DateTime, Utc};
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

const PATH: &str = "bookkeeping_entries";

string_enum! {
    pub enum BookkeepingEntryType {
        BookkeepingEntry => "bookkeeping_entry",
    }
}

/// One leg of a balanced bookkeeping entry set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookkeepingEntry {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    /// Signed amount in the minor unit of the account currency.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub entry_set_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<BookkeepingEntryType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(BookkeepingEntry, "bookkeeping_entry");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookkeepingEntryListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

service! {
    /// `/bookkeeping_entries`
    BookkeepingEntriesService
}

impl<T: Transport> BookkeepingEntriesService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &BookkeepingEntryListParams,
    ) -> Result<Page<BookkeepingEntry, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &BookkeepingEntryListParams,
    ) -> Result<Pager<BookkeepingEntry, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
