//! Transactions: settled movements of money on an account.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::{Currency, InFilter, TimeRange};

const PATH: &str = "transactions";

string_enum! {
    pub enum TransactionType {
        Transaction => "transaction",
    }
}

string_enum! {
    pub enum RouteType {
        AccountNumber => "account_number",
        Card => "card",
    }
}

string_enum! {
    /// The kind of event that produced a transaction.
    ///
    /// The source object carries a member of the same name with its details.
    pub enum TransactionSourceCategory {
        AccountTransferIntention => "account_transfer_intention",
        AchTransferIntention => "ach_transfer_intention",
        AchTransferRejection => "ach_transfer_rejection",
        AchTransferReturn => "ach_transfer_return",
        CardDisputeAcceptance => "card_dispute_acceptance",
        CardRefund => "card_refund",
        CardSettlement => "card_settlement",
        CheckDepositAcceptance => "check_deposit_acceptance",
        CheckDepositReturn => "check_deposit_return",
        CheckTransferDeposit => "check_transfer_deposit",
        CheckTransferIntention => "check_transfer_intention",
        CheckTransferStopPaymentRequest => "check_transfer_stop_payment_request",
        DisputeResolution => "dispute_resolution",
        FeePayment => "fee_payment",
        InboundAchTransfer => "inbound_ach_transfer",
        InboundCheck => "inbound_check",
        InboundInternationalAchTransfer => "inbound_international_ach_transfer",
        InboundRealTimePaymentsTransferConfirmation => "inbound_real_time_payments_transfer_confirmation",
        InboundWireDrawdownPayment => "inbound_wire_drawdown_payment",
        InboundWireReversal => "inbound_wire_reversal",
        InboundWireTransfer => "inbound_wire_transfer",
        InterestPayment => "interest_payment",
        InternalSource => "internal_source",
        RealTimePaymentsTransferAcknowledgement => "real_time_payments_transfer_acknowledgement",
        SampleFunds => "sample_funds",
        WireTransferIntention => "wire_transfer_intention",
        WireTransferRejection => "wire_transfer_rejection",
        Other => "other",
    }
}

/// Why a transaction happened.
///
/// The details live in a member named after `category`; they are kept
/// untyped in `extras` and reachable through [`detail`](Self::detail).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionSource {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub category: Field<TransactionSourceCategory>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl TransactionSource {
    /// The detail object for this source's category, if present.
    pub fn detail(&self) -> Option<&serde_json::Value> {
        let category = self.category.value()?;
        self.extras
            .get(category.as_str())
            .filter(|detail| !detail.is_null())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub account_id: Field<String>,
    /// Signed amount in the minor unit of `currency`; negative for debits.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub route_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub route_type: Field<RouteType>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub source: Field<TransactionSource>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<TransactionType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(Transaction, "transaction");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// An account number or card ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<InFilter<TransactionSourceCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/transactions`
    TransactionsService
}

impl<T: Transport> TransactionsService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, transaction_id: &str) -> Result<Transaction, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(transaction_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(
        &self,
        params: &TransactionListParams,
    ) -> Result<Page<Transaction, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &TransactionListParams,
    ) -> Result<Pager<Transaction, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use increase_core::codec::to_pairs;
    use serde_json::json;

    #[test]
    fn test_source_detail_follows_category() {
        let transaction: Transaction = serde_json::from_value(json!({
            "id": "transaction_uyrp7fld2ium70oa7oi",
            "amount": -1500,
            "source": {
                "category": "dispute_resolution",
                "dispute_resolution": {
                    "amount": 1500,
                    "currency": "USD",
                    "disputed_transaction_id": "transaction_7o5sscpbbdm2qp9jmgg0"
                },
                "card_refund": null
            },
            "type": "transaction"
        }))
        .unwrap();
        let source = transaction.source.value().unwrap();
        assert_eq!(
            source.detail().unwrap()["disputed_transaction_id"],
            json!("transaction_7o5sscpbbdm2qp9jmgg0")
        );
        assert_eq!(transaction.amount, Field::Present(-1500));
    }

    #[test]
    fn test_null_detail_is_none() {
        let source: TransactionSource =
            serde_json::from_value(json!({ "category": "card_refund", "card_refund": null }))
                .unwrap();
        assert!(source.detail().is_none());
    }

    #[test]
    fn test_list_filters() {
        let params = TransactionListParams {
            account_id: Some("account_in71c4amph0vgo2qllky".into()),
            category: Some(InFilter::new([
                TransactionSourceCategory::CardSettlement,
                TransactionSourceCategory::CardRefund,
            ])),
            created_at: Some(TimeRange::new().after(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
            ..Default::default()
        };
        let pairs = to_pairs(&params).unwrap();
        assert_eq!(pairs[1], ("category[in]".to_string(), "card_settlement,card_refund".to_string()));
        assert_eq!(pairs[2].0, "created_at[after]");
    }
}
