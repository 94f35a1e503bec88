//! Day-bucketed transfer accounting.
//!
//! Outbound ("spent") and inbound ("executed") volumes are summed per day,
//! where the day index is the block time divided by [`SECONDS_PER_DAY`].

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Length of an accounting day in seconds
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Volumes recorded for one day
#[cw_serde]
#[derive(Default)]
pub struct DayCounters {
    /// Outbound volume (local units)
    pub spent: Uint128,
    /// Inbound volume (message units)
    pub executed: Uint128,
}

/// Day index -> counters
pub const DAY_COUNTERS: Map<u64, DayCounters> = Map::new("day_counters");

/// Day index for a block time.
pub fn day_index(time: Timestamp) -> u64 {
    time.seconds() / SECONDS_PER_DAY
}

/// Counters for `day`, zeroed if nothing was recorded yet.
pub fn load(storage: &dyn Storage, day: u64) -> StdResult<DayCounters> {
    Ok(DAY_COUNTERS.may_load(storage, day)?.unwrap_or_default())
}

/// Add `value` to the outbound volume of `day`.
pub fn record_spent(
    storage: &mut dyn Storage,
    day: u64,
    value: Uint128,
) -> Result<DayCounters, ContractError> {
    let mut counters = load(storage, day)?;
    counters.spent = counters.spent.checked_add(value)?;
    DAY_COUNTERS.save(storage, day, &counters)?;
    Ok(counters)
}

/// Add `value` to the inbound volume of `day`.
pub fn record_executed(
    storage: &mut dyn Storage,
    day: u64,
    value: Uint128,
) -> Result<DayCounters, ContractError> {
    let mut counters = load(storage, day)?;
    counters.executed = counters.executed.checked_add(value)?;
    DAY_COUNTERS.save(storage, day, &counters)?;
    Ok(counters)
}
