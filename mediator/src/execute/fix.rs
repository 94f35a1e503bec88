//! Failed message fix requests.
//!
//! When a delivery to this mediator failed, anyone may ask the counterpart to
//! refund the original sender. The transport is the source of truth for the
//! failure; the counterpart's ledger makes the refund one-shot.

use cosmwasm_std::{to_json_binary, DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::msg::MediatorMsg;
use crate::state::{CONFIG, LIMITS};
use crate::transport::{
    query_failed_message_data_hash, query_failed_message_receiver, query_failed_message_sender,
    query_message_call_status, require_to_pass_message,
};

/// Execute handler for `RequestFailedMessageFix`. Repeatable.
pub fn execute_request_failed_message_fix(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    message_id: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let counterpart = config.counterpart()?;

    if query_message_call_status(&deps.querier, &config.transport, &message_id)? {
        return Err(ContractError::MessageNotFailed { message_id });
    }
    let receiver = query_failed_message_receiver(&deps.querier, &config.transport, &message_id)?;
    if receiver != env.contract.address.as_str() {
        return Err(ContractError::NotFailedMessageReceiver { message_id });
    }
    let sender = query_failed_message_sender(&deps.querier, &config.transport, &message_id)?;
    if sender != counterpart {
        return Err(ContractError::WrongOriginator);
    }
    let data_hash = query_failed_message_data_hash(&deps.querier, &config.transport, &message_id)?;

    let limits = LIMITS.load(deps.storage)?;
    let payload = to_json_binary(&MediatorMsg::FixFailedMessage {
        data_hash: data_hash.clone(),
    })?;
    let submit = require_to_pass_message(
        &config.transport,
        counterpart,
        payload,
        limits.request_gas_limit,
    )?;

    Ok(Response::new()
        .add_message(submit)
        .add_attribute("method", "request_failed_message_fix")
        .add_attribute("message_id", message_id)
        .add_attribute("data_hash", data_hash))
}
