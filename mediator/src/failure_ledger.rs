//! Records of relayed messages, used to refund the sender when the delivery
//! on the other chain fails.
//!
//! Each relay is stored under its data hash. The `fixed` flag flips from
//! `false` to `true` at most once, so a message can be refunded only once.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::hash::bytes32_to_hex;

/// An outbound relay as seen by the origin chain.
#[cw_serde]
pub struct RelayedMessage {
    /// Account refunded if the delivery fails
    pub sender: Addr,
    /// Recipient on the other chain
    pub recipient: String,
    /// Value taken from the sender (local units)
    pub value: Uint128,
    /// 0x-prefixed nonce carried by the payload
    pub nonce: String,
    /// Day the value was counted against
    pub day: u64,
    /// Transport-assigned id, filled in when the submission reply arrives
    pub message_id: Option<String>,
    pub fixed: bool,
}

/// Data hash -> relayed message
pub const RELAYED_MESSAGES: Map<&[u8], RelayedMessage> = Map::new("relayed_messages");

/// Transport message id -> data hash
pub const MESSAGE_HASHES: Map<&str, [u8; 32]> = Map::new("message_hashes");

/// Store a new relay record.
pub fn record(
    storage: &mut dyn Storage,
    data_hash: &[u8; 32],
    message: &RelayedMessage,
) -> StdResult<()> {
    RELAYED_MESSAGES.save(storage, data_hash, message)
}

/// Attach the transport message id to a stored relay.
pub fn set_message_id(
    storage: &mut dyn Storage,
    data_hash: &[u8; 32],
    message_id: &str,
) -> Result<RelayedMessage, ContractError> {
    let mut message = load(storage, data_hash)?;
    message.message_id = Some(message_id.to_string());
    RELAYED_MESSAGES.save(storage, data_hash, &message)?;
    MESSAGE_HASHES.save(storage, message_id, data_hash)?;
    Ok(message)
}

/// Load a relay record, failing with `UnknownMessage` if absent.
pub fn load(storage: &dyn Storage, data_hash: &[u8; 32]) -> Result<RelayedMessage, ContractError> {
    RELAYED_MESSAGES
        .may_load(storage, data_hash)?
        .ok_or_else(|| ContractError::UnknownMessage {
            data_hash: bytes32_to_hex(data_hash),
        })
}

/// Whether the relay under `data_hash` has been refunded.
pub fn is_fixed(storage: &dyn Storage, data_hash: &[u8; 32]) -> StdResult<bool> {
    Ok(RELAYED_MESSAGES
        .may_load(storage, data_hash)?
        .map(|m| m.fixed)
        .unwrap_or(false))
}

/// Flip the `fixed` flag, returning the record to refund.
pub fn mark_fixed(
    storage: &mut dyn Storage,
    data_hash: &[u8; 32],
) -> Result<RelayedMessage, ContractError> {
    let mut message = load(storage, data_hash)?;
    if message.fixed {
        return Err(ContractError::AlreadyFixed {
            data_hash: bytes32_to_hex(data_hash),
        });
    }
    message.fixed = true;
    RELAYED_MESSAGES.save(storage, data_hash, &message)?;
    Ok(message)
}
