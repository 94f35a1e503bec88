//! Error types for the AMB mediator contract

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

use crate::limits::LimitViolation;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: caller is not the transport contract")]
    UnauthorizedCaller,

    #[error("Unauthorized: message originator is not the counterpart mediator")]
    WrongOriginator,

    #[error("Unauthorized: asset {asset} is not bridged by this mediator")]
    UnauthorizedToken { asset: String },

    // ========================================================================
    // Limit & Amount Errors
    // ========================================================================

    #[error("Out of limits: {violation} (value {value})")]
    OutOfLimits {
        violation: LimitViolation,
        value: Uint128,
    },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Mediator is not initialized: counterpart mediator is not set")]
    NotInitialized,

    #[error("Cannot claim {asset}: it is the bridged asset")]
    CannotClaimBridgedAsset { asset: String },

    // ========================================================================
    // Failed Message Recovery Errors
    // ========================================================================

    #[error("Message already fixed: {data_hash}")]
    AlreadyFixed { data_hash: String },

    #[error("No relayed message recorded for data hash {data_hash}")]
    UnknownMessage { data_hash: String },

    #[error("Message {message_id} did not fail")]
    MessageNotFailed { message_id: String },

    #[error("Failed message {message_id} was not addressed to this mediator")]
    NotFailedMessageReceiver { message_id: String },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    // ========================================================================
    // Balance Reconciliation Errors
    // ========================================================================

    #[error("Nothing to fix: observed {observed} does not exceed tracked {tracked}")]
    NothingToFix { observed: Uint128, tracked: Uint128 },

    // ========================================================================
    // Transport & Transfer Errors
    // ========================================================================

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
