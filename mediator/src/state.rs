//! State definitions for the AMB mediator contract
//!
//! All state is owned by the mediator. Day counters live in
//! [`crate::day_accounting`], fee configuration in [`crate::fee_manager`] and
//! relayed-message records in [`crate::failure_ledger`].

use common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use crate::limits::Limits;

// ============================================================================
// Core Configuration
// ============================================================================

/// How the bridged asset enters and leaves the mediator.
#[cw_serde]
pub enum AssetMode {
    /// Native coins are locked on relay and unlocked on delivery
    Native { denom: String },
    /// CW20 tokens are held on relay and transferred out on delivery
    Cw20Lock { token: Addr },
    /// CW20 tokens are burned on relay and minted on delivery.
    /// The mediator must be the token's minter.
    Cw20Mint { token: Addr },
}

impl AssetMode {
    pub fn asset_info(&self) -> AssetInfo {
        match self {
            AssetMode::Native { denom } => AssetInfo::Native {
                denom: denom.clone(),
            },
            AssetMode::Cw20Lock { token } | AssetMode::Cw20Mint { token } => AssetInfo::Cw20 {
                contract_addr: token.clone(),
            },
        }
    }

    /// Whether bridged value is held by the mediator (and so tracked by
    /// the mediator balance).
    pub fn is_lock(&self) -> bool {
        !matches!(self, AssetMode::Cw20Mint { .. })
    }

    /// Identifier reported by the `BridgeMode` query.
    pub fn bridge_mode(&self) -> &'static str {
        match self {
            AssetMode::Native { .. } => "native-to-cw20-amb",
            AssetMode::Cw20Lock { .. } => "cw20-lock-to-cw20-amb",
            AssetMode::Cw20Mint { .. } => "cw20-mint-to-cw20-amb",
        }
    }
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Owner address for contract management
    pub owner: Addr,
    /// AMB transport contract on this chain
    pub transport: Addr,
    /// Mediator contract on the other chain (None until configured)
    pub counterpart: Option<String>,
    /// Bridged asset and how it is moved
    pub asset: AssetMode,
}

impl Config {
    /// Counterpart address, required before any message can be relayed.
    pub fn counterpart(&self) -> Result<&str, crate::ContractError> {
        self.counterpart
            .as_deref()
            .ok_or(crate::ContractError::NotInitialized)
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:amb-mediator";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interface version reported by the `BridgeMode` query (major, minor, patch)
pub const INTERFACE_VERSION: (u64, u64, u64) = (1, 1, 0);

/// Reply id of the transport submission made by a relay
pub const RELAY_REPLY_ID: u64 = 1;

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Transfer limits
pub const LIMITS: Item<Limits> = Item::new("limits");

/// Value of the bridged asset the mediator believes it holds.
/// Only meaningful for lock-based asset modes.
pub const MEDIATOR_BALANCE: Item<Uint128> = Item::new("mediator_balance");

/// Counter mixed into outbound nonces
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Data hash of the relay awaiting its transport reply
pub const PENDING_RELAY: Item<[u8; 32]> = Item::new("pending_relay");
