//! Message types for the AMB mediator contract
//!
//! This module defines the instantiate, execute and query messages, plus the
//! payloads exchanged with the counterpart mediator through the transport.

use common::{AssetInfo, TransportDelivery};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::failure_ledger::RelayedMessage;
use crate::fee_manager::FeeManager;
use crate::limits::Limits;
use crate::state::AssetMode;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Fee configuration as supplied by the owner
#[cw_serde]
pub struct FeeManagerMsg {
    /// Fee in basis points (max 1000)
    pub fee_bps: u64,
    /// Accounts sharing the fee
    pub reward_accounts: Vec<String>,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address for contract management
    pub owner: String,
    /// AMB transport contract on this chain
    pub transport: String,
    /// Mediator on the other chain; relays fail until it is set
    pub counterpart: Option<String>,
    /// Bridged asset and how it is moved
    pub asset: AssetMode,
    /// Initial limits, validated against the transport's max gas
    pub limits: Limits,
    /// Optional fee configuration
    pub fee_manager: Option<FeeManagerMsg>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound
    // ========================================================================
    /// Relay the attached native coins to `recipient` on the other chain
    RelayTokens { recipient: String },

    /// Relay CW20 tokens (called via CW20 send with [`ReceiveMsg`])
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Inbound (transport only)
    // ========================================================================
    /// Payload delivered by the transport from the counterpart mediator
    DeliverMessage(TransportDelivery),

    // ========================================================================
    // Failure Recovery
    // ========================================================================
    /// Ask the counterpart to refund a message whose delivery here failed
    ///
    /// Authorization: Anyone
    RequestFailedMessageFix { message_id: String },

    // ========================================================================
    // Balance Reconciliation (owner only)
    // ========================================================================
    /// Relay value held above the tracked balance to `recipient` on the
    /// other chain
    FixMediatorBalance { recipient: String },

    // ========================================================================
    // Limits & Wiring (owner only)
    // ========================================================================
    SetDailyLimit { value: Uint128 },
    SetMaxPerTx { value: Uint128 },
    SetMinPerTx { value: Uint128 },
    SetExecutionDailyLimit { value: Uint128 },
    SetExecutionMaxPerTx { value: Uint128 },
    SetRequestGasLimit { gas: u64 },
    SetDecimalShift { shift: u8 },
    SetTransport { transport: String },
    SetCounterpart { counterpart: String },

    // ========================================================================
    // Fees (owner only)
    // ========================================================================
    /// Replace the fee configuration, or clear it with `None`
    SetFeeManager { fee_manager: Option<FeeManagerMsg> },
    SetFee { fee_bps: u64 },
    AddRewardAccount { account: String },
    RemoveRewardAccount { account: String },

    // ========================================================================
    // Admin (owner only)
    // ========================================================================
    TransferOwnership { new_owner: String },

    /// Send the mediator's whole balance of a non-bridged asset to `recipient`
    ClaimTokens { asset: AssetInfo, recipient: String },
}

/// CW20 receive hook payload
#[cw_serde]
pub enum ReceiveMsg {
    RelayTokens { recipient: String },
}

/// Payload carried between the two mediators. The variant is the selector.
#[cw_serde]
pub enum MediatorMsg {
    /// Release `value` (sender-chain units) to `recipient`
    HandleBridgedTokens {
        recipient: String,
        value: Uint128,
        nonce: String,
    },
    /// Refund the relay recorded under `data_hash`
    FixFailedMessage { data_hash: String },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Limits)]
    Limits {},

    /// Day index of the current block
    #[returns(CurrentDayResponse)]
    CurrentDay {},

    #[returns(DayCountersResponse)]
    DayCounters { day: u64 },

    /// Tracked and observed balance of the bridged asset
    #[returns(MediatorBalanceResponse)]
    MediatorBalance {},

    /// Largest value a relay may carry today
    #[returns(AmountResponse)]
    MaxAvailablePerTx {},

    #[returns(WithinLimitResponse)]
    WithinLimit { value: Uint128 },

    #[returns(WithinLimitResponse)]
    WithinExecutionLimit { value: Uint128 },

    #[returns(FeeManagerResponse)]
    FeeManager {},

    #[returns(CalculateFeeResponse)]
    CalculateFee { value: Uint128 },

    #[returns(Option<RelayedMessage>)]
    RelayedMessage { data_hash: String },

    #[returns(MessageHashFixedResponse)]
    MessageHashFixed { data_hash: String },

    /// Data hash of a relay by its transport message id
    #[returns(MessageDataHashResponse)]
    MessageDataHash { message_id: String },

    #[returns(BridgeModeResponse)]
    BridgeMode {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub transport: Addr,
    pub counterpart: Option<String>,
    pub asset: AssetMode,
}

#[cw_serde]
pub struct CurrentDayResponse {
    pub day: u64,
}

#[cw_serde]
pub struct DayCountersResponse {
    pub day: u64,
    pub spent: Uint128,
    pub executed: Uint128,
}

#[cw_serde]
pub struct MediatorBalanceResponse {
    /// Balance according to the mediator's own accounting
    pub tracked: Uint128,
    /// Balance actually held (None in mint mode)
    pub observed: Option<Uint128>,
}

#[cw_serde]
pub struct AmountResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct WithinLimitResponse {
    pub within_limit: bool,
}

#[cw_serde]
pub struct FeeManagerResponse {
    pub fee_manager: Option<FeeManager>,
    /// Next round-robin starting index
    pub rotation: u32,
}

#[cw_serde]
pub struct CalculateFeeResponse {
    pub fee: Uint128,
    pub net: Uint128,
}

#[cw_serde]
pub struct MessageHashFixedResponse {
    pub fixed: bool,
}

#[cw_serde]
pub struct MessageDataHashResponse {
    pub data_hash: Option<String>,
}

#[cw_serde]
pub struct BridgeModeResponse {
    pub mode: String,
    pub interface_major: u64,
    pub interface_minor: u64,
    pub interface_patch: u64,
}
