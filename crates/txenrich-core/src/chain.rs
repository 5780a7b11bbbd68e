//! Chain identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EVM chain identifier, e.g. `ethereum` with chain id 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId {
    /// Human-readable slug, e.g. "ethereum"
    pub slug: String,
    /// EIP-155 chain id
    pub evm_chain_id: u64,
}

impl ChainId {
    pub fn evm(slug: impl Into<String>, chain_id: u64) -> Self {
        Self {
            slug: slug.into(),
            evm_chain_id: chain_id,
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        chains::ethereum()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug)
    }
}

/// Well-known chain IDs.
pub mod chains {
    use super::ChainId;

    pub fn ethereum() -> ChainId { ChainId::evm("ethereum", 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_display() {
        assert_eq!(chains::ethereum().to_string(), "ethereum");
        assert_eq!(chains::ethereum().evm_chain_id, 1);
        assert_eq!(ChainId::evm("gnosis", 100).to_string(), "gnosis");
    }

    #[test]
    fn chain_id_defaults_to_mainnet() {
        assert_eq!(ChainId::default(), chains::ethereum());
    }
}
