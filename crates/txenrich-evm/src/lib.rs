//! # txenrich-evm
//!
//! EVM side of txenrich: binary field extraction from receipt logs, the
//! address-keyed decoder table, and the protocol decoders.
//!
//! ## Log layout
//! - topics[0] → event signature hash (keccak256)
//! - topics[1..] → indexed parameters, each a 32-byte word
//! - `data` → non-indexed parameters, packed as consecutive 32-byte words

pub mod extract;
pub mod signature;
pub mod table;
pub mod votium;

pub use table::DecoderTable;
pub use votium::VotiumDecoder;
