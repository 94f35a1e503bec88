//! Admin operations handlers.
//!
//! This module handles:
//! - Ownership transfer
//! - Claiming assets sent to the mediator by mistake

use common::{Asset, AssetInfo};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};
use cw20::{BalanceResponse, Cw20QueryMsg};

use crate::error::ContractError;
use crate::state::CONFIG;

// ============================================================================
// Ownership
// ============================================================================

/// Hand the owner role to `new_owner`, effective immediately.
pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    let previous = std::mem::replace(&mut config.owner, new_owner_addr);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", previous)
        .add_attribute("new_owner", new_owner))
}

// ============================================================================
// Asset Recovery
// ============================================================================

/// Send the mediator's whole balance of `asset` to `recipient`.
///
/// The bridged asset is never claimable; surplus of it is handled by
/// `FixMediatorBalance`.
pub fn execute_claim_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    if asset == config.asset.asset_info() {
        return Err(ContractError::CannotClaimBridgedAsset { asset: asset.id() });
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;

    let amount = match &asset {
        AssetInfo::Native { denom } => {
            deps.querier
                .query_balance(&env.contract.address, denom)?
                .amount
        }
        AssetInfo::Cw20 { contract_addr } => {
            let res: BalanceResponse = deps.querier.query_wasm_smart(
                contract_addr,
                &Cw20QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                },
            )?;
            res.balance
        }
    };

    let mut response = Response::new()
        .add_attribute("method", "claim_tokens")
        .add_attribute("asset", asset.id())
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string());
    if !amount.is_zero() {
        response = response.add_message(Asset::new(asset, amount).transfer_msg(&recipient_addr)?);
    }

    Ok(response)
}
