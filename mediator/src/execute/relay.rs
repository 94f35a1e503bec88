//! Outbound relay handlers (native coins and CW20 receive).
//!
//! Value taken here is counted against the daily limit, described in a
//! `HandleBridgedTokens` payload and submitted to the transport. The reply to
//! that submission carries the transport-assigned message id.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, SubMsg, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::asset::{burn_msg, increase_tracked};
use crate::day_accounting::{self, day_index};
use crate::error::ContractError;
use crate::failure_ledger::{self, RelayedMessage};
use crate::hash::{bytes32_to_hex, compute_nonce, data_hash};
use crate::limits::validate_outbound;
use crate::msg::{MediatorMsg, ReceiveMsg};
use crate::state::{
    AssetMode, Config, CONFIG, LIMITS, OUTGOING_NONCE, PENDING_RELAY, RELAY_REPLY_ID,
};
use crate::transport::{message_id_from_response, require_to_pass_message};

/// Execute handler for relaying attached native coins
pub fn execute_relay_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let denom = match &config.asset {
        AssetMode::Native { denom } => denom,
        _ => {
            return Err(ContractError::UnauthorizedToken {
                asset: info
                    .funds
                    .first()
                    .map(|c| c.denom.clone())
                    .unwrap_or_else(|| "native".to_string()),
            })
        }
    };

    if let Some(coin) = info.funds.iter().find(|c| &c.denom != denom) {
        return Err(ContractError::UnauthorizedToken {
            asset: coin.denom.clone(),
        });
    }
    let value = match info.funds.as_slice() {
        [coin] => coin.amount,
        [] => {
            return Err(ContractError::InvalidAmount {
                reason: "no funds sent".to_string(),
            })
        }
        _ => {
            return Err(ContractError::InvalidAmount {
                reason: "duplicate coins sent".to_string(),
            })
        }
    };

    relay_value(deps, &env, &config, info.sender, recipient, value)
}

/// Execute handler for CW20 tokens sent to the mediator
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    match &config.asset {
        AssetMode::Cw20Lock { token } | AssetMode::Cw20Mint { token } if *token == info.sender => {}
        _ => {
            return Err(ContractError::UnauthorizedToken {
                asset: info.sender.to_string(),
            })
        }
    }

    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::RelayTokens { recipient } => {
            relay_value(deps, &env, &config, sender, recipient, cw20_msg.amount)
        }
    }
}

/// Count `value` (local units) against today's limits and submit it to the
/// transport. `sender` is refunded if the delivery fails.
pub(crate) fn relay_value(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    sender: Addr,
    recipient: String,
    value: Uint128,
) -> Result<Response, ContractError> {
    let counterpart = config.counterpart()?;
    if recipient.is_empty() {
        return Err(StdError::generic_err("recipient is empty").into());
    }

    let limits = LIMITS.load(deps.storage)?;
    let day = day_index(env.block.time);
    let counters = day_accounting::load(deps.storage, day)?;
    validate_outbound(value, &limits, counters.spent)
        .map_err(|violation| ContractError::OutOfLimits { violation, value })?;

    let bridged = limits
        .to_message_units(value)
        .ok_or_else(|| ContractError::InvalidAmount {
            reason: format!("{} is not a non-zero multiple of {}", value, limits.shift_factor()),
        })?;

    day_accounting::record_spent(deps.storage, day, value)?;

    // Nonce
    let counter = OUTGOING_NONCE.may_load(deps.storage)?.unwrap_or_default();
    OUTGOING_NONCE.save(deps.storage, &(counter + 1))?;
    let tx_index = env.transaction.as_ref().map(|t| t.index).unwrap_or(0);
    let nonce = bytes32_to_hex(&compute_nonce(
        &env.contract.address,
        env.block.height,
        tx_index,
        counter,
    ));

    let payload = to_json_binary(&MediatorMsg::HandleBridgedTokens {
        recipient: recipient.clone(),
        value: bridged,
        nonce: nonce.clone(),
    })?;
    let hash = data_hash(payload.as_slice());

    failure_ledger::record(
        deps.storage,
        &hash,
        &RelayedMessage {
            sender: sender.clone(),
            recipient: recipient.clone(),
            value,
            nonce: nonce.clone(),
            day,
            message_id: None,
            fixed: false,
        },
    )?;
    PENDING_RELAY.save(deps.storage, &hash)?;

    let tracked = increase_tracked(deps.storage, &config.asset, value)?;

    let submit = require_to_pass_message(
        &config.transport,
        counterpart,
        payload,
        limits.request_gas_limit,
    )?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if let Some(burn) = burn_msg(&config.asset, value)? {
        messages.push(burn);
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_submessage(SubMsg::reply_on_success(submit, RELAY_REPLY_ID))
        .add_attribute("method", "relay_tokens")
        .add_attribute("sender", sender)
        .add_attribute("recipient", recipient)
        .add_attribute("value", value.to_string())
        .add_attribute("bridged_value", bridged.to_string())
        .add_attribute("nonce", nonce)
        .add_attribute("data_hash", bytes32_to_hex(&hash))
        .add_attribute("mediator_balance", tracked.to_string()))
}

/// Reply handler for the transport submission made by [`relay_value`]
pub fn reply_relay(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let hash = PENDING_RELAY.load(deps.storage)?;
    PENDING_RELAY.remove(deps.storage);

    let response = msg.result.into_result().map_err(StdError::generic_err)?;
    let message_id = message_id_from_response(&response, &config.transport).ok_or_else(|| {
        StdError::generic_err("transport did not report a message id")
    })?;

    failure_ledger::set_message_id(deps.storage, &hash, &message_id)?;

    Ok(Response::new()
        .set_data(to_json_binary(&message_id)?)
        .add_attribute("method", "relay_submitted")
        .add_attribute("message_id", message_id)
        .add_attribute("data_hash", bytes32_to_hex(&hash)))
}
