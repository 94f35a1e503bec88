//! Movement of the bridged asset in and out of the mediator.

use common::Asset;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, Env, StdResult, Storage, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;
use crate::state::{AssetMode, MEDIATOR_BALANCE};

/// Message paying `amount` of the bridged asset to `recipient`.
///
/// Lock modes transfer from the mediator's holdings, `Cw20Mint` mints.
pub fn release_msg(mode: &AssetMode, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    match mode {
        AssetMode::Cw20Mint { token } => Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Mint {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        })),
        _ => Asset::new(mode.asset_info(), amount).transfer_msg(recipient),
    }
}

/// Message burning tokens received for relay, `None` for lock modes.
pub fn burn_msg(mode: &AssetMode, amount: Uint128) -> StdResult<Option<CosmosMsg>> {
    match mode {
        AssetMode::Cw20Mint { token } => Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Burn { amount })?,
            funds: vec![],
        }))),
        _ => Ok(None),
    }
}

/// Balance of the bridged asset actually held by the mediator.
pub fn observed_balance(deps: Deps, env: &Env, mode: &AssetMode) -> Result<Uint128, ContractError> {
    match mode {
        AssetMode::Native { denom } => Ok(deps
            .querier
            .query_balance(&env.contract.address, denom)?
            .amount),
        AssetMode::Cw20Lock { token } => {
            let res: BalanceResponse = deps.querier.query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                },
            )?;
            Ok(res.balance)
        }
        AssetMode::Cw20Mint { .. } => Err(ContractError::InvalidConfiguration {
            reason: "mint mode holds no balance".to_string(),
        }),
    }
}

/// Add to the tracked mediator balance (lock modes only).
pub fn increase_tracked(
    storage: &mut dyn Storage,
    mode: &AssetMode,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let tracked = MEDIATOR_BALANCE.may_load(storage)?.unwrap_or_default();
    if !mode.is_lock() {
        return Ok(tracked);
    }
    let tracked = tracked.checked_add(amount)?;
    MEDIATOR_BALANCE.save(storage, &tracked)?;
    Ok(tracked)
}

/// Subtract from the tracked mediator balance (lock modes only).
pub fn decrease_tracked(
    storage: &mut dyn Storage,
    mode: &AssetMode,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let tracked = MEDIATOR_BALANCE.may_load(storage)?.unwrap_or_default();
    if !mode.is_lock() {
        return Ok(tracked);
    }
    let tracked = tracked.checked_sub(amount)?;
    MEDIATOR_BALANCE.save(storage, &tracked)?;
    Ok(tracked)
}
