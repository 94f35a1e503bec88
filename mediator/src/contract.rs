//! AMB Mediator Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_reward_account, execute_claim_tokens, execute_deliver_message,
    execute_fix_mediator_balance, execute_receive, execute_relay_tokens,
    execute_remove_reward_account, execute_request_failed_message_fix, execute_set_counterpart,
    execute_set_daily_limit, execute_set_decimal_shift, execute_set_execution_daily_limit,
    execute_set_execution_max_per_tx, execute_set_fee, execute_set_fee_manager,
    execute_set_max_per_tx, execute_set_min_per_tx, execute_set_request_gas_limit,
    execute_set_transport, execute_transfer_ownership, fee_manager_from_msg, reply_relay,
};
use crate::fee_manager::set_fee_manager;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_bridge_mode, query_calculate_fee, query_config, query_current_day, query_day_counters,
    query_fee_manager, query_limits, query_max_available_per_tx, query_mediator_balance,
    query_message_data_hash, query_message_hash_fixed, query_relayed_message,
    query_within_execution_limit, query_within_limit,
};
use crate::state::{
    AssetMode, Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, LIMITS, MEDIATOR_BALANCE,
    OUTGOING_NONCE, RELAY_REPLY_ID,
};
use crate::transport::query_max_gas_per_tx;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let transport = deps.api.addr_validate(&msg.transport)?;

    let asset = match msg.asset {
        AssetMode::Native { denom } => {
            if denom.is_empty() {
                return Err(ContractError::InvalidConfiguration {
                    reason: "denom is empty".to_string(),
                });
            }
            AssetMode::Native { denom }
        }
        AssetMode::Cw20Lock { token } => AssetMode::Cw20Lock {
            token: deps.api.addr_validate(token.as_str())?,
        },
        AssetMode::Cw20Mint { token } => AssetMode::Cw20Mint {
            token: deps.api.addr_validate(token.as_str())?,
        },
    };

    if let Some(counterpart) = &msg.counterpart {
        if counterpart.trim().is_empty() {
            return Err(ContractError::InvalidConfiguration {
                reason: "counterpart is empty".to_string(),
            });
        }
    }

    // Limits must fit the transport's gas cap
    let max_gas = query_max_gas_per_tx(&deps.querier, &transport)?;
    msg.limits
        .validate(max_gas)
        .map_err(|reason| ContractError::InvalidConfiguration { reason })?;
    LIMITS.save(deps.storage, &msg.limits)?;

    let config = Config {
        owner,
        transport,
        counterpart: msg.counterpart,
        asset,
    };
    CONFIG.save(deps.storage, &config)?;

    if let Some(fee_manager) = msg.fee_manager {
        let manager = fee_manager_from_msg(deps.api, fee_manager)?;
        set_fee_manager(deps.storage, &env.contract.address, Some(manager))?;
    }

    MEDIATOR_BALANCE.save(deps.storage, &Uint128::zero())?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("transport", config.transport)
        .add_attribute("counterpart", config.counterpart.unwrap_or_default())
        .add_attribute("bridge_mode", config.asset.bridge_mode()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound
        ExecuteMsg::RelayTokens { recipient } => execute_relay_tokens(deps, env, info, recipient),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Inbound
        ExecuteMsg::DeliverMessage(delivery) => execute_deliver_message(deps, env, info, delivery),

        // Failure recovery
        ExecuteMsg::RequestFailedMessageFix { message_id } => {
            execute_request_failed_message_fix(deps, env, info, message_id)
        }

        // Balance reconciliation
        ExecuteMsg::FixMediatorBalance { recipient } => {
            execute_fix_mediator_balance(deps, env, info, recipient)
        }

        // Limits & wiring
        ExecuteMsg::SetDailyLimit { value } => execute_set_daily_limit(deps, info, value),
        ExecuteMsg::SetMaxPerTx { value } => execute_set_max_per_tx(deps, info, value),
        ExecuteMsg::SetMinPerTx { value } => execute_set_min_per_tx(deps, info, value),
        ExecuteMsg::SetExecutionDailyLimit { value } => {
            execute_set_execution_daily_limit(deps, info, value)
        }
        ExecuteMsg::SetExecutionMaxPerTx { value } => {
            execute_set_execution_max_per_tx(deps, info, value)
        }
        ExecuteMsg::SetRequestGasLimit { gas } => execute_set_request_gas_limit(deps, info, gas),
        ExecuteMsg::SetDecimalShift { shift } => execute_set_decimal_shift(deps, info, shift),
        ExecuteMsg::SetTransport { transport } => execute_set_transport(deps, info, transport),
        ExecuteMsg::SetCounterpart { counterpart } => {
            execute_set_counterpart(deps, info, counterpart)
        }

        // Fees
        ExecuteMsg::SetFeeManager { fee_manager } => {
            execute_set_fee_manager(deps, env, info, fee_manager)
        }
        ExecuteMsg::SetFee { fee_bps } => execute_set_fee(deps, info, fee_bps),
        ExecuteMsg::AddRewardAccount { account } => {
            execute_add_reward_account(deps, env, info, account)
        }
        ExecuteMsg::RemoveRewardAccount { account } => {
            execute_remove_reward_account(deps, info, account)
        }

        // Admin operations
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::ClaimTokens { asset, recipient } => {
            execute_claim_tokens(deps, env, info, asset, recipient)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        RELAY_REPLY_ID => reply_relay(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Limits {} => to_json_binary(&query_limits(deps)?),
        QueryMsg::BridgeMode {} => to_json_binary(&query_bridge_mode(deps)?),

        // Day accounting & limits
        QueryMsg::CurrentDay {} => to_json_binary(&query_current_day(env)),
        QueryMsg::DayCounters { day } => to_json_binary(&query_day_counters(deps, day)?),
        QueryMsg::MediatorBalance {} => to_json_binary(&query_mediator_balance(deps, env)?),
        QueryMsg::MaxAvailablePerTx {} => to_json_binary(&query_max_available_per_tx(deps, env)?),
        QueryMsg::WithinLimit { value } => to_json_binary(&query_within_limit(deps, env, value)?),
        QueryMsg::WithinExecutionLimit { value } => {
            to_json_binary(&query_within_execution_limit(deps, env, value)?)
        }

        // Fee queries
        QueryMsg::FeeManager {} => to_json_binary(&query_fee_manager(deps)?),
        QueryMsg::CalculateFee { value } => to_json_binary(&query_calculate_fee(deps, value)?),

        // Failed message queries
        QueryMsg::RelayedMessage { data_hash } => {
            to_json_binary(&query_relayed_message(deps, data_hash)?)
        }
        QueryMsg::MessageHashFixed { data_hash } => {
            to_json_binary(&query_message_hash_fixed(deps, data_hash)?)
        }
        QueryMsg::MessageDataHash { message_id } => {
            to_json_binary(&query_message_data_hash(deps, message_id)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Balance tracking may predate this version
    if MEDIATOR_BALANCE.may_load(deps.storage)?.is_none() {
        MEDIATOR_BALANCE.save(deps.storage, &Uint128::zero())?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
