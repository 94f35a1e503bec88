//! AMB Mediator Contract - Token Bridging over an Arbitrary Message Bridge
//!
//! This contract is one side of a two-chain token bridge. It talks to its
//! counterpart mediator on the other chain only through the AMB transport.
//!
//! # Outbound Flow
//! 1. User sends native coins (`RelayTokens`) or CW20 tokens (`Receive`)
//! 2. Value is checked against the outbound limits and counted for the day
//! 3. A `HandleBridgedTokens` payload is submitted to the transport
//!
//! # Inbound Flow
//! 1. Transport calls `DeliverMessage` with the counterpart as originator
//! 2. Value is checked against the execution limits and counted for the day
//! 3. Net value goes to the recipient, the fee to the reward accounts
//!
//! # Recovery
//! - `RequestFailedMessageFix` asks the counterpart to refund a failed delivery
//! - `FixFailedMessage` (inbound) refunds the original sender, once
//! - `FixMediatorBalance` relays value that arrived outside the entry points

pub mod asset;
pub mod contract;
pub mod day_accounting;
pub mod error;
mod execute;
pub mod failure_ledger;
pub mod fee_manager;
pub mod hash;
pub mod limits;
pub mod msg;
mod query;
pub mod state;
pub mod transport;

pub use crate::error::ContractError;
pub use crate::execute::CallContext;
pub use crate::fee_manager::{compute_fee, distribute, FeeManager};
pub use crate::hash::{data_hash, keccak256};
pub use crate::limits::{validate_inbound, validate_outbound, LimitViolation, Limits};
