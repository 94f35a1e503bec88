//! Fee Manager Module
//!
//! Computes the fee taken from inbound transfers and splits it across a set of
//! reward accounts.
//!
//! ## Fee Structure
//!
//! | Parameter        | Bound                 |
//! |------------------|-----------------------|
//! | Fee rate         | 0-10% (0-1000 bps)    |
//! | Reward accounts  | 1-50, unique          |
//!
//! ## Remainder Distribution
//!
//! `fee / n` goes to every account. The `fee % n` leftover units are handed out
//! one each to consecutive accounts starting at a persisted rotation index,
//! which advances by one on every distribution so that remainders even out.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum fee in basis points (10% = 1000 bps)
pub const MAX_FEE_BPS: u64 = 1000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10000;

/// Maximum number of reward accounts
pub const MAX_REWARD_ACCOUNTS: usize = 50;

// ============================================================================
// Data Structures
// ============================================================================

/// Fee configuration. Absent configuration means no fee is charged.
#[cw_serde]
pub struct FeeManager {
    /// Fee in basis points
    pub fee_bps: u64,
    /// Accounts receiving the fee, in distribution order
    pub reward_accounts: Vec<Addr>,
}

impl FeeManager {
    /// Validate the fee configuration.
    ///
    /// `mediator` is the contract's own address, which may not be rewarded.
    pub fn validate(&self, mediator: &Addr) -> Result<(), ContractError> {
        validate_fee_bps(self.fee_bps)?;
        if self.reward_accounts.is_empty() {
            return Err(invalid("reward account list is empty"));
        }
        if self.reward_accounts.len() > MAX_REWARD_ACCOUNTS {
            return Err(invalid(format!(
                "{} reward accounts exceed max {}",
                self.reward_accounts.len(),
                MAX_REWARD_ACCOUNTS
            )));
        }
        for (i, account) in self.reward_accounts.iter().enumerate() {
            if account == mediator {
                return Err(invalid("mediator cannot be a reward account"));
            }
            if self.reward_accounts[..i].contains(account) {
                return Err(invalid(format!("duplicate reward account {}", account)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Fee configuration storage
pub const FEE_MANAGER: Item<FeeManager> = Item::new("fee_manager");

/// Index of the reward account that receives the first remainder unit next
pub const FEE_ROTATION: Item<u32> = Item::new("fee_rotation");

// ============================================================================
// Fee Calculation Functions
// ============================================================================

/// Calculate fee amount from amount and bps
pub fn calculate_fee_from_bps(amount: Uint128, fee_bps: u64) -> Uint128 {
    amount.multiply_ratio(fee_bps as u128, BPS_DENOMINATOR)
}

/// Fee charged on `value` under the current configuration (0 when unset).
pub fn compute_fee(storage: &dyn Storage, value: Uint128) -> StdResult<Uint128> {
    Ok(match FEE_MANAGER.may_load(storage)? {
        Some(manager) => calculate_fee_from_bps(value, manager.fee_bps),
        None => Uint128::zero(),
    })
}

/// Split `fee` across `accounts`, starting remainder units at `rotation`.
///
/// Accounts whose share is zero are left out of the result.
pub fn distribute(fee: Uint128, accounts: &[Addr], rotation: u32) -> Vec<(Addr, Uint128)> {
    if accounts.is_empty() || fee.is_zero() {
        return vec![];
    }
    let n = accounts.len() as u128;
    let share = fee.u128() / n;
    let remainder = (fee.u128() - share * n) as usize;
    let start = rotation as usize % accounts.len();

    let mut amounts = vec![share; accounts.len()];
    for k in 0..remainder {
        amounts[(start + k) % accounts.len()] += 1;
    }

    accounts
        .iter()
        .cloned()
        .zip(amounts)
        .filter(|(_, amount)| *amount > 0)
        .map(|(account, amount)| (account, Uint128::new(amount)))
        .collect()
}

/// Split `fee` using the stored reward accounts and advance the rotation.
pub fn distribute_fee(storage: &mut dyn Storage, fee: Uint128) -> StdResult<Vec<(Addr, Uint128)>> {
    let Some(manager) = FEE_MANAGER.may_load(storage)? else {
        return Ok(vec![]);
    };
    if fee.is_zero() {
        return Ok(vec![]);
    }
    let rotation = FEE_ROTATION.may_load(storage)?.unwrap_or_default();
    let shares = distribute(fee, &manager.reward_accounts, rotation);

    let next = (rotation as usize + 1) % manager.reward_accounts.len();
    FEE_ROTATION.save(storage, &(next as u32))?;

    Ok(shares)
}

// ============================================================================
// Admin Functions (to be called from execute handlers)
// ============================================================================

/// Validate a fee rate is within bounds
pub fn validate_fee_bps(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(invalid(format!(
            "fee {} bps exceeds max {}",
            fee_bps, MAX_FEE_BPS
        )));
    }
    Ok(())
}

/// Replace (or clear) the fee configuration.
pub fn set_fee_manager(
    storage: &mut dyn Storage,
    mediator: &Addr,
    manager: Option<FeeManager>,
) -> Result<(), ContractError> {
    match manager {
        Some(manager) => {
            manager.validate(mediator)?;
            FEE_MANAGER.save(storage, &manager)?;
            FEE_ROTATION.save(storage, &0)?;
        }
        None => {
            FEE_MANAGER.remove(storage);
            FEE_ROTATION.remove(storage);
        }
    }
    Ok(())
}

/// Load the fee configuration, failing when none is set.
pub fn load_fee_manager(storage: &dyn Storage) -> Result<FeeManager, ContractError> {
    FEE_MANAGER
        .may_load(storage)?
        .ok_or_else(|| invalid("fee manager is not set"))
}

/// Append a reward account.
pub fn add_reward_account(
    storage: &mut dyn Storage,
    mediator: &Addr,
    account: Addr,
) -> Result<(), ContractError> {
    let mut manager = load_fee_manager(storage)?;
    manager.reward_accounts.push(account);
    manager.validate(mediator)?;
    FEE_MANAGER.save(storage, &manager)?;
    Ok(())
}

/// Remove a reward account, keeping the order of the rest.
pub fn remove_reward_account(
    storage: &mut dyn Storage,
    account: &Addr,
) -> Result<(), ContractError> {
    let mut manager = load_fee_manager(storage)?;
    let position = manager
        .reward_accounts
        .iter()
        .position(|a| a == account)
        .ok_or_else(|| invalid(format!("{} is not a reward account", account)))?;
    if manager.reward_accounts.len() == 1 {
        return Err(invalid("cannot remove the last reward account"));
    }
    manager.reward_accounts.remove(position);

    let rotation = FEE_ROTATION.may_load(storage)?.unwrap_or_default();
    let rotation = rotation % manager.reward_accounts.len() as u32;
    FEE_ROTATION.save(storage, &rotation)?;
    FEE_MANAGER.save(storage, &manager)?;
    Ok(())
}

fn invalid(reason: impl Into<String>) -> ContractError {
    ContractError::InvalidConfiguration {
        reason: reason.into(),
    }
}
