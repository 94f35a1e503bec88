//! Transfer limit policy.
//!
//! Pure decision functions: nothing here touches storage. The caller passes
//! the relevant day counter in, which keeps the policy testable in isolation
//! and keeps the counters owned by [`crate::day_accounting`].

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Largest supported decimal shift; keeps `10^shift` well inside `u128`.
pub const MAX_DECIMAL_SHIFT: u8 = 18;

/// Transfer limits. All values are in the smallest unit of the asset.
#[cw_serde]
pub struct Limits {
    /// Maximum outbound volume per day (0 = unlimited)
    pub daily_limit: Uint128,
    /// Maximum outbound value per relay
    pub max_per_tx: Uint128,
    /// Minimum outbound value per relay
    pub min_per_tx: Uint128,
    /// Maximum inbound volume per day (0 = unlimited)
    pub execution_daily_limit: Uint128,
    /// Maximum inbound value per delivery
    pub execution_max_per_tx: Uint128,
    /// Gas requested from the transport for each relayed call
    pub request_gas_limit: u64,
    /// Local value = foreign value * 10^decimal_shift
    pub decimal_shift: u8,
}

/// Reason a value was rejected by the limit policy.
#[cw_serde]
#[derive(Copy)]
pub enum LimitViolation {
    BelowMinimum,
    AboveMaximum,
    DailyLimitExceeded,
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LimitViolation::BelowMinimum => "below minimum per transaction",
            LimitViolation::AboveMaximum => "above maximum per transaction",
            LimitViolation::DailyLimitExceeded => "daily limit exceeded",
        };
        f.write_str(s)
    }
}

impl Limits {
    /// Check the invariants between limit fields.
    ///
    /// `max_gas_per_tx` is the transport's cap on requested gas.
    pub fn validate(&self, max_gas_per_tx: u64) -> Result<(), String> {
        if self.min_per_tx > self.max_per_tx {
            return Err(format!(
                "min_per_tx {} exceeds max_per_tx {}",
                self.min_per_tx, self.max_per_tx
            ));
        }
        if !self.daily_limit.is_zero() && self.max_per_tx > self.daily_limit {
            return Err(format!(
                "max_per_tx {} exceeds daily_limit {}",
                self.max_per_tx, self.daily_limit
            ));
        }
        if !self.execution_daily_limit.is_zero()
            && self.execution_max_per_tx > self.execution_daily_limit
        {
            return Err(format!(
                "execution_max_per_tx {} exceeds execution_daily_limit {}",
                self.execution_max_per_tx, self.execution_daily_limit
            ));
        }
        if self.request_gas_limit > max_gas_per_tx {
            return Err(format!(
                "request_gas_limit {} exceeds transport max gas {}",
                self.request_gas_limit, max_gas_per_tx
            ));
        }
        if self.decimal_shift > MAX_DECIMAL_SHIFT {
            return Err(format!(
                "decimal_shift {} exceeds {}",
                self.decimal_shift, MAX_DECIMAL_SHIFT
            ));
        }
        Ok(())
    }

    /// `10^decimal_shift`
    pub fn shift_factor(&self) -> Uint128 {
        Uint128::new(10u128.pow(self.decimal_shift as u32))
    }

    /// `value` (local units) in message units, if it is a non-zero whole
    /// number of them.
    pub fn to_message_units(&self, value: Uint128) -> Option<Uint128> {
        let factor = self.shift_factor().u128();
        if value.u128() % factor != 0 {
            return None;
        }
        let units = value.u128() / factor;
        (units != 0).then_some(Uint128::new(units))
    }
}

/// Validate an outbound relay of `value` given today's spent volume.
pub fn validate_outbound(
    value: Uint128,
    limits: &Limits,
    day_spent: Uint128,
) -> Result<(), LimitViolation> {
    if value < limits.min_per_tx {
        return Err(LimitViolation::BelowMinimum);
    }
    if value > limits.max_per_tx {
        return Err(LimitViolation::AboveMaximum);
    }
    if !limits.daily_limit.is_zero() && exceeds(day_spent, value, limits.daily_limit) {
        return Err(LimitViolation::DailyLimitExceeded);
    }
    Ok(())
}

/// Validate an inbound execution of `value` given today's executed volume.
pub fn validate_inbound(
    value: Uint128,
    limits: &Limits,
    day_executed: Uint128,
) -> Result<(), LimitViolation> {
    if value > limits.execution_max_per_tx {
        return Err(LimitViolation::AboveMaximum);
    }
    if !limits.execution_daily_limit.is_zero()
        && exceeds(day_executed, value, limits.execution_daily_limit)
    {
        return Err(LimitViolation::DailyLimitExceeded);
    }
    Ok(())
}

/// Largest value a single relay may carry today.
pub fn max_available_per_tx(limits: &Limits, day_spent: Uint128) -> Uint128 {
    if limits.daily_limit.is_zero() {
        return limits.max_per_tx;
    }
    let remaining = limits.daily_limit.saturating_sub(day_spent);
    remaining.min(limits.max_per_tx)
}

// An overflowing sum is over any limit.
fn exceeds(used: Uint128, value: Uint128, limit: Uint128) -> bool {
    match used.checked_add(value) {
        Ok(total) => total > limit,
        Err(_) => true,
    }
}
