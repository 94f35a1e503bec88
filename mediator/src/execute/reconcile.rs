//! Balance reconciliation handlers (owner only).
//!
//! Value can reach the mediator without passing through a relay entry point
//! (a plain bank send, a CW20 `Transfer`). `FixMediatorBalance` relays the
//! surplus to the other chain so that the tracked balance matches what the
//! mediator actually holds.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::asset::observed_balance;
use crate::day_accounting::{self, day_index};
use crate::error::ContractError;
use crate::execute::relay::relay_value;
use crate::limits::max_available_per_tx;
use crate::state::{CONFIG, LIMITS, MEDIATOR_BALANCE};

/// Relay the untracked surplus to `recipient` on the other chain.
///
/// The amount is capped by what today's limits still allow and rounded down
/// to a whole number of units on the other chain. Refunds of a failed sweep
/// go to the owner.
pub fn execute_fix_mediator_balance(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    config.counterpart()?;

    let observed = observed_balance(deps.as_ref(), &env, &config.asset)?;
    let tracked = MEDIATOR_BALANCE.may_load(deps.storage)?.unwrap_or_default();
    if observed <= tracked {
        return Err(ContractError::NothingToFix { observed, tracked });
    }

    let limits = LIMITS.load(deps.storage)?;
    let counters = day_accounting::load(deps.storage, day_index(env.block.time))?;
    let available = max_available_per_tx(&limits, counters.spent);

    let diff = (observed - tracked).min(available);
    let factor = limits.shift_factor();
    let diff = diff - Uint128::new(diff.u128() % factor.u128());

    let response = relay_value(deps, &env, &config, info.sender, recipient, diff)?;
    Ok(response
        .add_attribute("action", "fix_mediator_balance")
        .add_attribute("observed", observed.to_string())
        .add_attribute("previous_tracked", tracked.to_string()))
}
