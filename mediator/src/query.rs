//! Query handlers for the AMB mediator contract.

use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128};

use crate::asset::observed_balance;
use crate::day_accounting::{self, day_index};
use crate::failure_ledger::{self, RelayedMessage, MESSAGE_HASHES, RELAYED_MESSAGES};
use crate::fee_manager::{compute_fee, FEE_MANAGER, FEE_ROTATION};
use crate::hash::{bytes32_to_hex, hex_to_bytes32};
use crate::limits::{max_available_per_tx, validate_inbound, validate_outbound, Limits};
use crate::msg::{
    AmountResponse, BridgeModeResponse, CalculateFeeResponse, ConfigResponse, CurrentDayResponse,
    DayCountersResponse, FeeManagerResponse, MediatorBalanceResponse, MessageDataHashResponse,
    MessageHashFixedResponse, WithinLimitResponse,
};
use crate::state::{CONFIG, INTERFACE_VERSION, LIMITS, MEDIATOR_BALANCE};

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        transport: config.transport,
        counterpart: config.counterpart,
        asset: config.asset,
    })
}

pub fn query_limits(deps: Deps) -> StdResult<Limits> {
    LIMITS.load(deps.storage)
}

pub fn query_bridge_mode(deps: Deps) -> StdResult<BridgeModeResponse> {
    let config = CONFIG.load(deps.storage)?;
    let (major, minor, patch) = INTERFACE_VERSION;
    Ok(BridgeModeResponse {
        mode: config.asset.bridge_mode().to_string(),
        interface_major: major,
        interface_minor: minor,
        interface_patch: patch,
    })
}

// ============================================================================
// Day Accounting & Limits
// ============================================================================

pub fn query_current_day(env: Env) -> CurrentDayResponse {
    CurrentDayResponse {
        day: day_index(env.block.time),
    }
}

pub fn query_day_counters(deps: Deps, day: u64) -> StdResult<DayCountersResponse> {
    let counters = day_accounting::load(deps.storage, day)?;
    Ok(DayCountersResponse {
        day,
        spent: counters.spent,
        executed: counters.executed,
    })
}

pub fn query_max_available_per_tx(deps: Deps, env: Env) -> StdResult<AmountResponse> {
    let limits = LIMITS.load(deps.storage)?;
    let counters = day_accounting::load(deps.storage, day_index(env.block.time))?;
    Ok(AmountResponse {
        amount: max_available_per_tx(&limits, counters.spent),
    })
}

/// Whether a relay of `value` would pass today's outbound limits and carry a
/// whole number of message units.
pub fn query_within_limit(
    deps: Deps,
    env: Env,
    value: Uint128,
) -> StdResult<WithinLimitResponse> {
    let limits = LIMITS.load(deps.storage)?;
    let counters = day_accounting::load(deps.storage, day_index(env.block.time))?;
    Ok(WithinLimitResponse {
        within_limit: validate_outbound(value, &limits, counters.spent).is_ok()
            && limits.to_message_units(value).is_some(),
    })
}

/// Whether a delivery of `value` would pass today's inbound limits.
pub fn query_within_execution_limit(
    deps: Deps,
    env: Env,
    value: Uint128,
) -> StdResult<WithinLimitResponse> {
    let limits = LIMITS.load(deps.storage)?;
    let counters = day_accounting::load(deps.storage, day_index(env.block.time))?;
    Ok(WithinLimitResponse {
        within_limit: validate_inbound(value, &limits, counters.executed).is_ok(),
    })
}

pub fn query_mediator_balance(deps: Deps, env: Env) -> StdResult<MediatorBalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let tracked = MEDIATOR_BALANCE.may_load(deps.storage)?.unwrap_or_default();
    let observed = if config.asset.is_lock() {
        Some(
            observed_balance(deps, &env, &config.asset)
                .map_err(|e| StdError::generic_err(e.to_string()))?,
        )
    } else {
        None
    };
    Ok(MediatorBalanceResponse { tracked, observed })
}

// ============================================================================
// Fee Queries
// ============================================================================

pub fn query_fee_manager(deps: Deps) -> StdResult<FeeManagerResponse> {
    Ok(FeeManagerResponse {
        fee_manager: FEE_MANAGER.may_load(deps.storage)?,
        rotation: FEE_ROTATION.may_load(deps.storage)?.unwrap_or_default(),
    })
}

/// Fee and net amount for an inbound release of `value` (local units).
pub fn query_calculate_fee(deps: Deps, value: Uint128) -> StdResult<CalculateFeeResponse> {
    let fee = compute_fee(deps.storage, value)?;
    Ok(CalculateFeeResponse {
        fee,
        net: value.checked_sub(fee)?,
    })
}

// ============================================================================
// Failed Message Queries
// ============================================================================

pub fn query_relayed_message(deps: Deps, data_hash: String) -> StdResult<Option<RelayedMessage>> {
    let hash = parse_hash(&data_hash)?;
    RELAYED_MESSAGES.may_load(deps.storage, &hash)
}

pub fn query_message_hash_fixed(
    deps: Deps,
    data_hash: String,
) -> StdResult<MessageHashFixedResponse> {
    let hash = parse_hash(&data_hash)?;
    Ok(MessageHashFixedResponse {
        fixed: failure_ledger::is_fixed(deps.storage, &hash)?,
    })
}

pub fn query_message_data_hash(
    deps: Deps,
    message_id: String,
) -> StdResult<MessageDataHashResponse> {
    Ok(MessageDataHashResponse {
        data_hash: MESSAGE_HASHES
            .may_load(deps.storage, &message_id)?
            .map(|h| bytes32_to_hex(&h)),
    })
}

fn parse_hash(data_hash: &str) -> StdResult<[u8; 32]> {
    hex_to_bytes32(data_hash).map_err(|e| StdError::generic_err(e.to_string()))
}
