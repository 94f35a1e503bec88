//! Calls into the AMB transport contract.

use common::transport::{
    FailedMessageDataHashResponse, FailedMessageReceiverResponse, FailedMessageSenderResponse,
    MaxGasPerTxResponse, MessageCallStatusResponse, TransportExecuteMsg, TransportQueryMsg,
    MESSAGE_ID_ATTRIBUTE,
};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, QuerierWrapper, StdResult, SubMsgResponse, WasmMsg,
};

/// Build the submission of `data` for delivery to `counterpart`.
pub fn require_to_pass_message(
    transport: &Addr,
    counterpart: &str,
    data: Binary,
    gas: u64,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: transport.to_string(),
        msg: to_json_binary(&TransportExecuteMsg::RequireToPassMessage {
            contract: counterpart.to_string(),
            data,
            gas,
        })?,
        funds: vec![],
    })
}

/// Message id reported by the transport in a submission reply.
///
/// Only attributes emitted by `transport` itself are considered.
pub fn message_id_from_response(response: &SubMsgResponse, transport: &Addr) -> Option<String> {
    response
        .events
        .iter()
        .filter(|event| event.ty == "wasm")
        .filter(|event| {
            event
                .attributes
                .iter()
                .any(|a| a.key == "_contract_address" && a.value == transport.as_str())
        })
        .flat_map(|event| event.attributes.iter())
        .find(|a| a.key == MESSAGE_ID_ATTRIBUTE)
        .map(|a| a.value.clone())
}

pub fn query_max_gas_per_tx(querier: &QuerierWrapper, transport: &Addr) -> StdResult<u64> {
    let res: MaxGasPerTxResponse =
        querier.query_wasm_smart(transport, &TransportQueryMsg::MaxGasPerTx {})?;
    Ok(res.max_gas_per_tx)
}

pub fn query_message_call_status(
    querier: &QuerierWrapper,
    transport: &Addr,
    message_id: &str,
) -> StdResult<bool> {
    let res: MessageCallStatusResponse = querier.query_wasm_smart(
        transport,
        &TransportQueryMsg::MessageCallStatus {
            message_id: message_id.to_string(),
        },
    )?;
    Ok(res.status)
}

pub fn query_failed_message_data_hash(
    querier: &QuerierWrapper,
    transport: &Addr,
    message_id: &str,
) -> StdResult<String> {
    let res: FailedMessageDataHashResponse = querier.query_wasm_smart(
        transport,
        &TransportQueryMsg::FailedMessageDataHash {
            message_id: message_id.to_string(),
        },
    )?;
    Ok(res.data_hash)
}

pub fn query_failed_message_receiver(
    querier: &QuerierWrapper,
    transport: &Addr,
    message_id: &str,
) -> StdResult<String> {
    let res: FailedMessageReceiverResponse = querier.query_wasm_smart(
        transport,
        &TransportQueryMsg::FailedMessageReceiver {
            message_id: message_id.to_string(),
        },
    )?;
    Ok(res.receiver)
}

pub fn query_failed_message_sender(
    querier: &QuerierWrapper,
    transport: &Addr,
    message_id: &str,
) -> StdResult<String> {
    let res: FailedMessageSenderResponse = querier.query_wasm_smart(
        transport,
        &TransportQueryMsg::FailedMessageSender {
            message_id: message_id.to_string(),
        },
    )?;
    Ok(res.sender)
}
