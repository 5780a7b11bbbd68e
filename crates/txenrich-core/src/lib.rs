//! # txenrich-core
//!
//! Core types shared across txenrich crates: transactions and receipt logs,
//! accounting history events, asset resolution, and the decoder interface
//! every protocol decoder implements.

pub mod asset;
pub mod chain;
pub mod decoder;
pub mod error;
pub mod event;
pub mod transaction;

pub use asset::{
    asset_normalized_value, AssetId, AssetKind, AssetResolver, AssetsConfig, CryptoAsset,
    EvmToken, MemoryAssetResolver,
};
pub use chain::ChainId;
pub use decoder::{
    decode_routine, ActionItem, DecodeRoutine, DecoderInterface, DecodingOutput, Notifier,
    TracingNotifier,
};
pub use error::{AssetError, ConfigError, DecodeError, RegistryError};
pub use event::{Balance, Enrichment, HistoryEvent, HistoryEventSubType, HistoryEventType};
pub use transaction::{EvmTransaction, EvmTxReceiptLog};
