//! Sandbox-only endpoints that simulate events from outside Increase.

use chrono::{DateTime, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use super::card_disputes::{CardDispute, CardDisputeStatus};
use crate::filters::Currency;

string_enum! {
    pub enum InboundWireDrawdownRequestType {
        InboundWireDrawdownRequest => "inbound_wire_drawdown_request",
    }
}

/// A request from another bank to pull funds by wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboundWireDrawdownRequest {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    /// The account number the drawdown was addressed to.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub recipient_account_number_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_routing_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line3: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_routing_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line3: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_to_beneficiary_information: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub message_to_recipient: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<InboundWireDrawdownRequestType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(InboundWireDrawdownRequest, "inbound_wire_drawdown_request");

/// Body of `POST /simulations/inbound_wire_drawdown_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InboundWireDrawdownRequestCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub recipient_account_number_id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub amount: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub currency: Field<Currency>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_routing_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficiary_address_line3: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_account_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_routing_number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_address_line3: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub originator_to_beneficiary_information: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub message_to_recipient: Field<String>,
}

/// Body of `POST /simulations/card_disputes/{id}/action`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardDisputeActionParams {
    /// The status to move the dispute to: `accepted` or `rejected`.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub status: Field<CardDisputeStatus>,
    /// Required when rejecting.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub explanation: Field<String>,
}

service! {
    /// Sandbox simulations, grouped by the resource they act on.
    SimulationsService
}

service! {
    /// `/simulations/inbound_wire_drawdown_requests`
    InboundWireDrawdownRequestSimulations
}

service! {
    /// `/simulations/card_disputes`
    CardDisputeSimulations
}

impl<T: Transport> SimulationsService<T> {
    pub fn inbound_wire_drawdown_requests(&self) -> InboundWireDrawdownRequestSimulations<T> {
        InboundWireDrawdownRequestSimulations::new(self.client.clone())
            .with_options(self.options.clone())
    }

    pub fn card_disputes(&self) -> CardDisputeSimulations<T> {
        CardDisputeSimulations::new(self.client.clone()).with_options(self.options.clone())
    }
}

impl<T: Transport> InboundWireDrawdownRequestSimulations<T> {
    /// Simulates another bank sending a drawdown request to one of your account numbers.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(
        &self,
        params: &InboundWireDrawdownRequestCreateParams,
    ) -> Result<InboundWireDrawdownRequest, IncreaseError> {
        self.client
            .post("simulations/inbound_wire_drawdown_requests", params, &self.options)
            .await
    }
}

impl<T: Transport> CardDisputeSimulations<T> {
    /// Moves a pending dispute to a final state, as Increase's review would.
    ///
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn action(
        &self,
        card_dispute_id: &str,
        params: &CardDisputeActionParams,
    ) -> Result<CardDispute, IncreaseError> {
        self.client
            .post(
                &format!("simulations/card_disputes/{}/action", path_segment(card_dispute_id)?),
                params,
                &self.options,
            )
            .await
    }
}
