//! Accounts hold balances and are the source or destination of every transfer.

use chrono::{DateTime, NaiveDate, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{Currency, TimeRange};

const PATH: &str = "accounts";

string_enum! {
    /// The discriminator of an [`Account`].
    pub enum AccountType {
        Account => "account",
    }
}

string_enum! {
    pub enum AccountStatus {
        /// Open and able to transact.
        Open => "open",
        /// Closed; no further transactions are possible.
        Closed => "closed",
    }
}

string_enum! {
    /// The partner bank holding the account's funds.
    pub enum AccountBank {
        CoreBank => "core_bank",
        FirstInternetBank => "first_internet_bank",
        GrasshopperBank => "grasshopper_bank",
    }
}

/// An Increase account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<AccountStatus>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub bank: Field<AccountBank>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub entity_id: Field<String>,
    /// An entity that is informed of, but does not own, the account.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub informational_entity_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub program_id: Field<String>,
    /// Interest accrued but not yet paid, as a decimal string in the account currency.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub interest_accrued: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub interest_accrued_at: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub interest_rate: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<AccountType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(Account, "account");

/// Body of `POST /accounts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub entity_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub informational_entity_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub program_id: Field<String>,
}

impl AccountCreateParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Field::Present(name.into()),
            ..Self::default()
        }
    }
}

/// Body of `PATCH /accounts/{id}`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountUpdateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountListParams {
    /// Resume from a cursor returned by an earlier page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page size, up to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informational_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/accounts`
    AccountsService
}

impl<T: Transport> AccountsService<T> {
    /// Creates an account.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(&self, params: &AccountCreateParams) -> Result<Account, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// Retrieves an account by ID.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Api`] with a 404 status if no such account exists.
    pub async fn retrieve(&self, account_id: &str) -> Result<Account, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(account_id)?), &self.options)
            .await
    }

    /// Updates an account. Only fields that are set are sent.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn update(
        &self,
        account_id: &str,
        params: &AccountUpdateParams,
    ) -> Result<Account, IncreaseError> {
        self.client
            .patch(&format!("{PATH}/{}", path_segment(account_id)?), params, &self.options)
            .await
    }

    /// Fetches the first page of accounts.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &AccountListParams,
    ) -> Result<Page<Account, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// Walks every account lazily, one page at a time.
    ///
    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &AccountListParams,
    ) -> Result<Pager<Account, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }

    /// Closes an account. A closed account cannot be reopened.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn close(&self, account_id: &str) -> Result<Account, IncreaseError> {
        self.client
            .post_action(&format!("{PATH}/{}/close", path_segment(account_id)?), &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use increase_core::ApiObject;
    use increase_core::codec::{decode, encode, to_pairs};
    use serde_json::{Value, json};

    fn sample() -> Value {
        json!({
            "id": "account_in71c4amph0vgo2qllky",
            "name": "My first account!",
            "status": "open",
            "bank": "first_internet_bank",
            "currency": "USD",
            "entity_id": "entity_n8y8tnk2p9339ti393yi",
            "informational_entity_id": null,
            "interest_accrued": "0.01",
            "interest_accrued_at": "2020-01-31",
            "created_at": "2020-01-31T23:59:59Z",
            "type": "account",
            "replacement": { "replaced_by_account_id": null }
        })
    }

    #[test]
    fn test_decode_account() {
        let account: Account = decode(sample().to_string().as_bytes()).unwrap();
        assert_eq!(account.status, Field::Present(AccountStatus::Open));
        assert_eq!(account.currency, Field::Present(Currency::Usd));
        assert!(account.informational_entity_id.is_null());
        assert!(account.program_id.is_omitted());
        assert!(account.has_expected_type());
        assert!(account.extras().contains_key("replacement"));
    }

    #[test]
    fn test_reencode_keeps_every_key() {
        let account: Account = decode(sample().to_string().as_bytes()).unwrap();
        let reencoded: Value = serde_json::from_slice(&encode(&account).unwrap()).unwrap();
        assert_eq!(reencoded, sample());
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let unset = serde_json::to_value(AccountUpdateParams::default()).unwrap();
        assert_eq!(unset, json!({}));

        let cleared = AccountUpdateParams { name: Field::Null };
        assert_eq!(serde_json::to_value(cleared).unwrap(), json!({ "name": null }));
    }

    #[test]
    fn test_create_params() {
        let params = AccountCreateParams {
            entity_id: "entity_1".into(),
            ..AccountCreateParams::new("Payroll")
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({ "name": "Payroll", "entity_id": "entity_1" })
        );
    }

    #[test]
    fn test_list_params_query() {
        let params = AccountListParams {
            limit: Some(10),
            status: Some(AccountStatus::Closed),
            ..Default::default()
        };
        let pairs = to_pairs(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("status".to_string(), "closed".to_string()),
            ]
        );
        assert!(to_pairs(&AccountListParams::default()).unwrap().is_empty());
    }
}
