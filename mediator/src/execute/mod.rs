//! Execute handlers for the AMB mediator contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `relay` - RelayTokens and Receive handlers for outbound transfers
//! - `inbound` - DeliverMessage: bridged token release and failed message fixes
//! - `fix` - RequestFailedMessageFix
//! - `reconcile` - FixMediatorBalance
//! - `config` - Limit setters, transport and counterpart wiring
//! - `fees` - Fee manager and reward accounts
//! - `admin` - Ownership transfer and token claims

mod admin;
mod config;
mod fees;
mod fix;
mod inbound;
mod reconcile;
mod relay;

pub use admin::*;
pub use config::*;
pub use fees::*;
pub use fix::*;
pub use inbound::*;
pub use reconcile::*;
pub use relay::*;
