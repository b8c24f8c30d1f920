//! Monthly statements for an account.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::TimeRange;

const PATH: &str = "account_statements";

string_enum! {
    pub enum AccountStatementType {
        AccountStatement => "account_statement",
    }
}

/// A statement covering one period of an account's activity.
///
/// Balances are in the minor unit of the account currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountStatement {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    /// The PDF rendering of the statement.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub file_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub statement_period_start: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub statement_period_end: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub starting_balance: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub ending_balance: Field<i64>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<AccountStatementType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(AccountStatement, "account_statement");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountStatementListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_period_start: Option<TimeRange>,
}

service! {
    /// `/account_statements`
    AccountStatementsService
}

impl<T: Transport> AccountStatementsService<T> {
    /// Retrieves a statement by ID.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, statement_id: &str) -> Result<AccountStatement, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(statement_id)?), &self.options)
            .await
    }

    /// Fetches the first page of statements.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &AccountStatementListParams,
    ) -> Result<Page<AccountStatement, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// Walks every statement lazily.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &AccountStatementListParams,
    ) -> Result<Pager<AccountStatement, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}
