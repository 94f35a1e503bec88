//! Configuration management handlers.
//!
//! This module handles:
//! - Limit setters (one field per message, each re-validated)
//! - Transport and counterpart wiring

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::limits::Limits;
use crate::state::{CONFIG, LIMITS};
use crate::transport::query_max_gas_per_tx;

// ============================================================================
// Limits
// ============================================================================

/// Apply `update` to the stored limits and re-check their invariants.
fn update_limits(
    deps: DepsMut,
    info: &MessageInfo,
    method: &str,
    update: impl FnOnce(&mut Limits),
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let mut limits = LIMITS.load(deps.storage)?;
    update(&mut limits);

    let max_gas = query_max_gas_per_tx(&deps.querier, &config.transport)?;
    limits
        .validate(max_gas)
        .map_err(|reason| ContractError::InvalidConfiguration { reason })?;
    LIMITS.save(deps.storage, &limits)?;

    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("daily_limit", limits.daily_limit.to_string())
        .add_attribute("max_per_tx", limits.max_per_tx.to_string())
        .add_attribute("min_per_tx", limits.min_per_tx.to_string())
        .add_attribute("execution_daily_limit", limits.execution_daily_limit.to_string())
        .add_attribute("execution_max_per_tx", limits.execution_max_per_tx.to_string())
        .add_attribute("request_gas_limit", limits.request_gas_limit.to_string())
        .add_attribute("decimal_shift", limits.decimal_shift.to_string()))
}

pub fn execute_set_daily_limit(
    deps: DepsMut,
    info: MessageInfo,
    value: Uint128,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_daily_limit", |l| l.daily_limit = value)
}

pub fn execute_set_max_per_tx(
    deps: DepsMut,
    info: MessageInfo,
    value: Uint128,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_max_per_tx", |l| l.max_per_tx = value)
}

pub fn execute_set_min_per_tx(
    deps: DepsMut,
    info: MessageInfo,
    value: Uint128,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_min_per_tx", |l| l.min_per_tx = value)
}

pub fn execute_set_execution_daily_limit(
    deps: DepsMut,
    info: MessageInfo,
    value: Uint128,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_execution_daily_limit", |l| {
        l.execution_daily_limit = value
    })
}

pub fn execute_set_execution_max_per_tx(
    deps: DepsMut,
    info: MessageInfo,
    value: Uint128,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_execution_max_per_tx", |l| {
        l.execution_max_per_tx = value
    })
}

/// Set the gas requested for each relayed call (capped by the transport).
pub fn execute_set_request_gas_limit(
    deps: DepsMut,
    info: MessageInfo,
    gas: u64,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_request_gas_limit", |l| {
        l.request_gas_limit = gas
    })
}

/// Set the decimal shift between this chain and the other.
///
/// Values already relayed are not rescaled.
pub fn execute_set_decimal_shift(
    deps: DepsMut,
    info: MessageInfo,
    shift: u8,
) -> Result<Response, ContractError> {
    update_limits(deps, &info, "set_decimal_shift", |l| l.decimal_shift = shift)
}

// ============================================================================
// Wiring
// ============================================================================

/// Point the mediator at a new transport contract.
///
/// The current request gas limit must fit the new transport's cap.
pub fn execute_set_transport(
    deps: DepsMut,
    info: MessageInfo,
    transport: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let transport_addr = deps.api.addr_validate(&transport)?;
    let max_gas = query_max_gas_per_tx(&deps.querier, &transport_addr)?;
    LIMITS
        .load(deps.storage)?
        .validate(max_gas)
        .map_err(|reason| ContractError::InvalidConfiguration { reason })?;

    config.transport = transport_addr;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_transport")
        .add_attribute("transport", transport))
}

/// Set the mediator on the other chain.
pub fn execute_set_counterpart(
    deps: DepsMut,
    info: MessageInfo,
    counterpart: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    if counterpart.trim().is_empty() {
        return Err(ContractError::InvalidConfiguration {
            reason: "counterpart is empty".to_string(),
        });
    }

    config.counterpart = Some(counterpart.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_counterpart")
        .add_attribute("counterpart", counterpart))
}
