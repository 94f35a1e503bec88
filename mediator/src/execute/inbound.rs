//! Inbound handlers for payloads delivered by the transport.
//!
//! A delivery is authorized once through its [`CallContext`], naming both
//! the immediate caller (which must be the transport) and the logical sender
//! on the other chain (which must be the counterpart mediator). The payload
//! handlers below only run after that check.

use common::TransportDelivery;
use cosmwasm_std::{
    from_json, Addr, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use crate::asset::{decrease_tracked, release_msg};
use crate::day_accounting::{self, day_index};
use crate::error::ContractError;
use crate::failure_ledger;
use crate::fee_manager::{compute_fee, distribute_fee};
use crate::hash::hex_to_bytes32;
use crate::limits::validate_inbound;
use crate::msg::MediatorMsg;
use crate::state::{Config, CONFIG, LIMITS};

/// Who is calling, as seen by an inbound operation
#[derive(Clone, Debug, PartialEq)]
pub struct CallContext {
    /// Immediate caller on this chain
    pub caller: Addr,
    /// Originator on the other chain, as authenticated by the transport
    pub logical_sender: String,
}

impl CallContext {
    /// Require the transport as caller and the counterpart as originator.
    pub fn authorize(&self, config: &Config) -> Result<(), ContractError> {
        if self.caller != config.transport {
            return Err(ContractError::UnauthorizedCaller);
        }
        if self.logical_sender != config.counterpart()? {
            return Err(ContractError::WrongOriginator);
        }
        Ok(())
    }
}

/// Execute handler for `DeliverMessage`
pub fn execute_deliver_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    delivery: TransportDelivery,
) -> Result<Response, ContractError> {
    let ctx = CallContext {
        caller: info.sender,
        logical_sender: delivery.sender,
    };

    // Authorize before looking at the payload
    let config = CONFIG.load(deps.storage)?;
    ctx.authorize(&config)?;

    let msg: MediatorMsg = from_json(&delivery.data)?;
    match msg {
        MediatorMsg::HandleBridgedTokens {
            recipient,
            value,
            nonce,
        } => handle_bridged_tokens(
            deps,
            env,
            &config,
            &delivery.message_id,
            recipient,
            value,
            nonce,
        ),
        MediatorMsg::FixFailedMessage { data_hash } => fix_failed_message(deps, &config, data_hash),
    }
}

/// Release `value` (sender-chain units) to `recipient`, minus fees.
fn handle_bridged_tokens(
    deps: DepsMut,
    env: Env,
    config: &Config,
    message_id: &str,
    recipient: String,
    value: Uint128,
    nonce: String,
) -> Result<Response, ContractError> {
    let limits = LIMITS.load(deps.storage)?;
    let day = day_index(env.block.time);
    let counters = day_accounting::load(deps.storage, day)?;
    validate_inbound(value, &limits, counters.executed)
        .map_err(|violation| ContractError::OutOfLimits { violation, value })?;

    let recipient = deps
        .api
        .addr_validate(&recipient)
        .map_err(|e| ContractError::TransferFailed {
            reason: e.to_string(),
        })?;

    day_accounting::record_executed(deps.storage, day, value)?;

    let local_value = value.checked_mul(limits.shift_factor())?;
    let fee = compute_fee(deps.storage, local_value)?;
    let net = local_value.checked_sub(fee)?;

    let tracked = decrease_tracked(deps.storage, &config.asset, local_value)?;
    let shares = distribute_fee(deps.storage, fee)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if !net.is_zero() {
        messages.push(release_msg(&config.asset, &recipient, net)?);
    }
    for (account, amount) in &shares {
        messages.push(release_msg(&config.asset, account, *amount)?);
    }

    let mut response = Response::new()
        .add_messages(messages)
        .add_attribute("method", "handle_bridged_tokens")
        .add_attribute("message_id", message_id)
        .add_attribute("recipient", recipient)
        .add_attribute("value", local_value.to_string())
        .add_attribute("net", net.to_string())
        .add_attribute("nonce", nonce)
        .add_attribute("mediator_balance", tracked.to_string());

    if !fee.is_zero() {
        response = response.add_event(
            Event::new("fee_distributed")
                .add_attribute("fee_amount", fee.to_string())
                .add_attribute("message_id", message_id)
                .add_attribute("reward_accounts", shares.len().to_string()),
        );
    }

    Ok(response)
}

/// Refund the sender of the relay recorded under `data_hash`, exactly once.
fn fix_failed_message(
    deps: DepsMut,
    config: &Config,
    data_hash: String,
) -> Result<Response, ContractError> {
    let hash = hex_to_bytes32(&data_hash)?;
    let message = failure_ledger::mark_fixed(deps.storage, &hash)?;

    let tracked = decrease_tracked(deps.storage, &config.asset, message.value)?;
    let refund = release_msg(&config.asset, &message.sender, message.value)?;

    Ok(Response::new()
        .add_message(refund)
        .add_attribute("method", "fix_failed_message")
        .add_attribute("mediator_balance", tracked.to_string())
        .add_event(
            Event::new("failed_message_fixed")
                .add_attribute("data_hash", data_hash)
                .add_attribute("recipient", message.sender)
                .add_attribute("value", message.value.to_string()),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AssetMode;

    fn config(counterpart: Option<&str>) -> Config {
        Config {
            owner: Addr::unchecked("terra1owner"),
            transport: Addr::unchecked("terra1amb"),
            counterpart: counterpart.map(str::to_string),
            asset: AssetMode::Native {
                denom: "uluna".to_string(),
            },
        }
    }

    fn ctx(caller: &str, sender: &str) -> CallContext {
        CallContext {
            caller: Addr::unchecked(caller),
            logical_sender: sender.to_string(),
        }
    }

    #[test]
    fn test_authorize() {
        let config = config(Some("0xcounterpart"));
        assert_eq!(ctx("terra1amb", "0xcounterpart").authorize(&config), Ok(()));
        assert_eq!(
            ctx("terra1user", "0xcounterpart").authorize(&config),
            Err(ContractError::UnauthorizedCaller)
        );
        assert_eq!(
            ctx("terra1amb", "0xattacker").authorize(&config),
            Err(ContractError::WrongOriginator)
        );
    }

    #[test]
    fn test_authorize_without_counterpart() {
        let config = config(None);
        assert_eq!(
            ctx("terra1amb", "0xcounterpart").authorize(&config),
            Err(ContractError::NotInitialized)
        );
    }
}
