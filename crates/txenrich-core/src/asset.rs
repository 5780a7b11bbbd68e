//! Asset identity and resolution.
//!
//! Decoders never build asset metadata themselves. They ask an
//! [`AssetResolver`] to map a token contract to a known fungible asset, and to
//! resolve an event's asset identifier to its display form.

use alloy_primitives::{Address, U256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    path::Path,
    str::FromStr,
    sync::{Arc, RwLock},
};

use crate::error::{AssetError, ConfigError, DecodeError, RegistryError};

/// Canonical asset identifier, e.g. `eip155:1/erc20:0x6B17...1d0F` or `ETH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// CAIP-19 style identifier for a token contract on an EVM chain.
    pub fn evm_token(chain_id: u64, kind: AssetKind, address: &Address) -> Self {
        Self(format!(
            "eip155:{chain_id}/{kind}:{}",
            address.to_checksum(None)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of asset an identifier points to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Erc20,
    Erc721,
    Native,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Erc20 => write!(f, "erc20"),
            AssetKind::Erc721 => write!(f, "erc721"),
            AssetKind::Native => write!(f, "native"),
        }
    }
}

/// A fungible token contract known to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmToken {
    pub identifier: AssetId,
    pub address: Address,
    pub symbol: String,
    /// Decimal precision used to normalize raw integer amounts
    pub decimals: u8,
}

/// Display form of a resolved crypto asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub identifier: AssetId,
    pub name: String,
    pub symbol: String,
}

/// Lookup interface the decoders use for asset metadata.
///
/// Implementations are expected to be in-memory or cache backed; decoders
/// call them synchronously once per log.
pub trait AssetResolver: Send + Sync {
    /// Map a token contract address to a known fungible token.
    /// Returns `None` for unknown addresses and for non-fungible contracts.
    fn evm_address_to_asset(&self, address: &Address) -> Option<EvmToken>;

    /// Resolve an asset identifier to its crypto asset representation.
    fn resolve_to_crypto_asset(&self, identifier: &AssetId) -> Result<CryptoAsset, AssetError>;
}

/// Convert a raw on-chain integer into a decimal amount: `raw / 10^decimals`.
pub fn asset_normalized_value(raw: U256, token: &EvmToken) -> Result<BigDecimal, DecodeError> {
    BigDecimal::from_str(&format!("{raw}e-{}", token.decimals)).map_err(|e| {
        DecodeError::Normalization {
            reason: format!("{raw} with {} decimals: {e}", token.decimals),
        }
    })
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// A single asset entry of an assets file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Explicit identifier; derived from chain id and address when absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub identifier: Option<String>,
    /// Token contract address; absent for native assets
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address: Option<Address>,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default)]
    pub kind: AssetKind,
}

fn default_decimals() -> u8 { 18 }
fn default_chain_id() -> u64 { 1 }

/// Asset list loaded from YAML.
///
/// ```yaml
/// chain_id: 1
/// assets:
///   - address: "0x6B175474E89094C44Da98b954EedeAC495271d0F"
///     symbol: DAI
///     name: Dai Stablecoin
///     decimals: 18
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

impl AssetsConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

// ─── In-memory resolver ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct AssetRecord {
    identifier: AssetId,
    address: Option<Address>,
    symbol: String,
    name: String,
    decimals: u8,
    kind: AssetKind,
}

#[derive(Default)]
struct Inner {
    /// identifier → record
    by_identifier: HashMap<AssetId, AssetRecord>,
    /// contract address → identifier
    by_address: HashMap<Address, AssetId>,
}

/// Thread-safe in-memory [`AssetResolver`].
#[derive(Clone, Default)]
pub struct MemoryAssetResolver {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from an assets file.
    pub fn from_config(config: &AssetsConfig) -> Result<Self, RegistryError> {
        let resolver = Self::new();
        for entry in &config.assets {
            resolver.add_entry(config.chain_id, entry)?;
        }
        Ok(resolver)
    }

    /// Load an assets YAML file and build a resolver from it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = AssetsConfig::from_file(path)?;
        Ok(Self::from_config(&config)?)
    }

    /// Register an ERC-20 token on Ethereum mainnet and return its identifier.
    pub fn add_erc20(
        &self,
        address: Address,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Result<AssetId, RegistryError> {
        let symbol = symbol.into();
        self.add_entry(
            1,
            &AssetEntry {
                identifier: None,
                address: Some(address),
                name: symbol.clone(),
                symbol,
                decimals,
                kind: AssetKind::Erc20,
            },
        )
    }

    /// Register one asset entry and return its identifier.
    ///
    /// Fails without modifying the resolver if the identifier or the contract
    /// address is already registered.
    pub fn add_entry(&self, chain_id: u64, entry: &AssetEntry) -> Result<AssetId, RegistryError> {
        let identifier = match (&entry.identifier, &entry.address) {
            (Some(id), _) => AssetId::new(id.clone()),
            (None, Some(address)) => AssetId::evm_token(chain_id, entry.kind, address),
            (None, None) => AssetId::new(entry.symbol.clone()),
        };

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.by_identifier.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            });
        }
        if let Some(address) = entry.address {
            if inner.by_address.contains_key(&address) {
                return Err(RegistryError::DuplicateAsset {
                    address: address.to_checksum(None),
                });
            }
            inner.by_address.insert(address, identifier.clone());
        }
        inner.by_identifier.insert(
            identifier.clone(),
            AssetRecord {
                identifier: identifier.clone(),
                address: entry.address,
                symbol: entry.symbol.clone(),
                name: entry.name.clone(),
                decimals: entry.decimals,
                kind: entry.kind,
            },
        );
        Ok(identifier)
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetResolver for MemoryAssetResolver {
    fn evm_address_to_asset(&self, address: &Address) -> Option<EvmToken> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let identifier = inner.by_address.get(address)?;
        let record = inner.by_identifier.get(identifier)?;
        if record.kind != AssetKind::Erc20 {
            return None;
        }
        Some(EvmToken {
            identifier: record.identifier.clone(),
            address: record.address?,
            symbol: record.symbol.clone(),
            decimals: record.decimals,
        })
    }

    fn resolve_to_crypto_asset(&self, identifier: &AssetId) -> Result<CryptoAsset, AssetError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let record = inner
            .by_identifier
            .get(identifier)
            .ok_or_else(|| AssetError::UnknownAsset {
                identifier: identifier.to_string(),
            })?;
        if record.kind == AssetKind::Erc721 {
            return Err(AssetError::WrongAssetType {
                identifier: identifier.to_string(),
                kind: record.kind.to_string(),
            });
        }
        Ok(CryptoAsset {
            identifier: record.identifier.clone(),
            name: record.name.clone(),
            symbol: record.symbol.clone(),
        })
    }
}
