//! Fee configuration handlers (owner only).

use cosmwasm_std::{Addr, Api, DepsMut, Env, MessageInfo, Response, StdResult, Storage};

use crate::error::ContractError;
use crate::fee_manager::{
    add_reward_account, load_fee_manager, remove_reward_account, set_fee_manager,
    validate_fee_bps, FeeManager, FEE_MANAGER,
};
use crate::msg::FeeManagerMsg;
use crate::state::CONFIG;

/// Validate the addresses of a fee configuration supplied by the owner.
pub fn fee_manager_from_msg(api: &dyn Api, msg: FeeManagerMsg) -> StdResult<FeeManager> {
    let reward_accounts = msg
        .reward_accounts
        .iter()
        .map(|a| api.addr_validate(a))
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(FeeManager {
        fee_bps: msg.fee_bps,
        reward_accounts,
    })
}

fn ensure_owner(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Replace the fee configuration, or clear it.
pub fn execute_set_fee_manager(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    fee_manager: Option<FeeManagerMsg>,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let manager = fee_manager
        .map(|m| fee_manager_from_msg(deps.api, m))
        .transpose()?;
    let fee_bps = manager.as_ref().map(|m| m.fee_bps).unwrap_or(0);
    set_fee_manager(deps.storage, &env.contract.address, manager)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_manager")
        .add_attribute("fee_bps", fee_bps.to_string()))
}

pub fn execute_set_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee_bps: u64,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;
    validate_fee_bps(fee_bps)?;

    let mut manager = load_fee_manager(deps.storage)?;
    manager.fee_bps = fee_bps;
    FEE_MANAGER.save(deps.storage, &manager)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee")
        .add_attribute("fee_bps", fee_bps.to_string()))
}

pub fn execute_add_reward_account(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let account_addr = deps.api.addr_validate(&account)?;
    add_reward_account(deps.storage, &env.contract.address, account_addr)?;

    Ok(Response::new()
        .add_attribute("method", "add_reward_account")
        .add_attribute("account", account))
}

pub fn execute_remove_reward_account(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info)?;

    let account_addr = deps.api.addr_validate(&account)?;
    remove_reward_account(deps.storage, &account_addr)?;

    Ok(Response::new()
        .add_attribute("method", "remove_reward_account")
        .add_attribute("account", account))
}
