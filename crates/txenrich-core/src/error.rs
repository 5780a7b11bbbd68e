//! Error types for the txenrich decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single receipt log.
///
/// These never cross a decoder boundary: decoders log them and fall back to
/// an empty [`DecodingOutput`](crate::decoder::DecodingOutput).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Log has {got} topics, topic {index} is required")]
    MissingTopic { index: usize, got: usize },

    #[error("Log data too short: need bytes {start}..{end}, got {len}")]
    DataTooShort { start: usize, end: usize, len: usize },

    #[error("Word range {start}..{end} does not fit a 256-bit integer")]
    WordTooWide { start: usize, end: usize },

    #[error("Amount normalization failed: {reason}")]
    Normalization { reason: String },
}

/// Errors raised when an asset identifier cannot be turned into a usable asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Unknown asset {identifier}")]
    UnknownAsset { identifier: String },

    #[error("Asset {identifier} is a {kind}, not a fungible crypto asset")]
    WrongAssetType { identifier: String, kind: String },
}

/// Errors from the decoder table.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Address {address} is already handled by another decoder")]
    DuplicateAddress { address: String },

    #[error("Asset {address} is already registered")]
    DuplicateAsset { address: String },

    #[error("Asset identifier {identifier} is already registered")]
    DuplicateIdentifier { identifier: String },
}

/// Errors from loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid asset entry: {0}")]
    Registry(#[from] RegistryError),
}
