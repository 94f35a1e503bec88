//! Common - Shared Types for the AMB Mediator Contracts
//!
//! This package provides the asset identifiers and the message/query
//! interface of the arbitrary message bridge (AMB) transport, shared by the
//! mediator contract and anything that drives it (transport, tests, tooling).

pub mod asset;
pub mod transport;

pub use asset::{Asset, AssetInfo};
pub use transport::{TransportDelivery, TransportExecuteMsg, TransportQueryMsg};
