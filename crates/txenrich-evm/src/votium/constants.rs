use alloy_primitives::{address, b256, Address, B256};

/// Counterparty identifier attached to events decoded here.
pub const CPT_VOTIUM: &str = "votium";

/// Protocol name used in generated notes.
pub const VOTIUM_PROTOCOL: &str = "votium";

/// topics[0] of `Claimed(address indexed token, uint256 index, uint256 amount,
/// address indexed account, uint256 indexed update)`.
pub const VOTIUM_CLAIM: B256 =
    b256!("4766921f5c59646d22d7d266a29164c8e9623684d8dfdbd931731dfdca025238");

/// Votium multi-merkle stash on Ethereum mainnet.
pub const VOTIUM_CONTRACT: Address = address!("378ba9b73309be80bf4c2c027aad799766a7ed5a");
