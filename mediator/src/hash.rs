//! Hashing helpers for message identity.
//!
//! Relayed payloads are identified by `keccak256(payload)` (the data hash),
//! the same value the transport reports for a failed delivery. Outbound
//! nonces are derived from the block position plus a per-contract counter.
//!
//! # Nonce Byte Layout
//! - contract address (UTF-8, variable length)
//! - block height (u64, big-endian)
//! - transaction index (u32, big-endian, 0 when unavailable)
//! - relay counter (u64, big-endian)

use cosmwasm_std::{Addr, StdError};
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Data hash of a relayed payload
pub fn data_hash(payload: &[u8]) -> [u8; 32] {
    keccak256(payload)
}

/// Unique nonce for an outbound relay
pub fn compute_nonce(contract: &Addr, height: u64, tx_index: u32, counter: u64) -> [u8; 32] {
    let contract = contract.as_bytes();
    let mut data = Vec::with_capacity(contract.len() + 20);
    data.extend_from_slice(contract);
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&tx_index.to_be_bytes());
    data.extend_from_slice(&counter.to_be_bytes());
    keccak256(&data)
}

/// Convert bytes32 to 0x-prefixed hex string
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(value: &str) -> Result<[u8; 32], ContractError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)
        .map_err(|e| StdError::generic_err(format!("Invalid hex {}: {}", value, e)))?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got })
}
