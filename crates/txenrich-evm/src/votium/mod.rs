//! Votium bribe distribution.
//!
//! Votium pays vote-incentive bribes out of a merkle distributor. The token
//! transfer itself is decoded generically; this module recognizes the
//! distributor's `Claimed` log and marks the matching receive as a reward.

pub mod constants;
pub mod decoder;

pub use constants::{CPT_VOTIUM, VOTIUM_CLAIM, VOTIUM_CONTRACT};
pub use decoder::VotiumDecoder;
