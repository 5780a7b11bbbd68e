//! Event signature hashing.
//!
//! topics[0] of an EVM log is the keccak256 hash of the event's canonical
//! signature string, e.g. `keccak256("Transfer(address,address,uint256)")`.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of a canonical event signature: `"EventName(type1,type2,...)"`.
pub fn event_signature(signature: &str) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    B256::from(output)
}
