//! Interface of the arbitrary message bridge (AMB) transport.
//!
//! The transport delivers an authenticated payload from a contract on one
//! chain to a contract on the other. Mediators submit payloads with
//! [`TransportExecuteMsg::RequireToPassMessage`] and receive them through
//! the `deliver_message` entry point wrapped in [`TransportDelivery`],
//! following the same receiver pattern as `cw20::Cw20ReceiveMsg`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, StdResult, WasmMsg};

/// Attribute key under which the transport reports the assigned message id.
pub const MESSAGE_ID_ATTRIBUTE: &str = "message_id";

/// Execute messages accepted by the transport.
#[cw_serde]
pub enum TransportExecuteMsg {
    /// Queue `data` for delivery to `contract` on the other chain.
    ///
    /// The transport emits a `message_id` attribute identifying the message.
    RequireToPassMessage {
        contract: String,
        data: Binary,
        gas: u64,
    },
}

/// Queries answered by the transport.
#[cw_serde]
#[derive(QueryResponses)]
pub enum TransportQueryMsg {
    /// Maximum gas a single relayed call may request.
    #[returns(MaxGasPerTxResponse)]
    MaxGasPerTx {},

    /// Whether the delivery of `message_id` executed successfully.
    #[returns(MessageCallStatusResponse)]
    MessageCallStatus { message_id: String },

    /// keccak256 of the payload whose delivery failed.
    #[returns(FailedMessageDataHashResponse)]
    FailedMessageDataHash { message_id: String },

    /// Contract that was supposed to receive the failed delivery.
    #[returns(FailedMessageReceiverResponse)]
    FailedMessageReceiver { message_id: String },

    /// Originator (other-chain sender) of the failed delivery.
    #[returns(FailedMessageSenderResponse)]
    FailedMessageSender { message_id: String },
}

#[cw_serde]
pub struct MaxGasPerTxResponse {
    pub max_gas_per_tx: u64,
}

#[cw_serde]
pub struct MessageCallStatusResponse {
    pub status: bool,
}

#[cw_serde]
pub struct FailedMessageDataHashResponse {
    /// 0x-prefixed hex of the 32-byte hash
    pub data_hash: String,
}

#[cw_serde]
pub struct FailedMessageReceiverResponse {
    pub receiver: String,
}

#[cw_serde]
pub struct FailedMessageSenderResponse {
    pub sender: String,
}

/// Payload the transport hands to a receiving contract.
///
/// `sender` is the identity of the contract that submitted the message on
/// the other chain, as authenticated by the transport.
#[cw_serde]
pub struct TransportDelivery {
    pub message_id: String,
    pub sender: String,
    pub data: Binary,
}

impl TransportDelivery {
    /// Serializes the delivery wrapped in the receiver's `DeliverMessage`
    /// variant.
    pub fn into_binary(self) -> StdResult<Binary> {
        let msg = ReceiverExecuteMsg::DeliverMessage(self);
        to_json_binary(&msg)
    }

    /// Creates the execute message delivering this payload to `contract_addr`.
    pub fn into_cosmos_msg<T: Into<String>, C>(self, contract_addr: T) -> StdResult<CosmosMsg<C>>
    where
        C: Clone + std::fmt::Debug + PartialEq + schemars::JsonSchema,
    {
        let msg = self.into_binary()?;
        let execute = WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg,
            funds: vec![],
        };
        Ok(execute.into())
    }
}

// Used only to give the delivery its variant name on the wire.
#[cw_serde]
enum ReceiverExecuteMsg {
    DeliverMessage(TransportDelivery),
}
