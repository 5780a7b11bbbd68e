//! Accounting history events produced by the decoding pipeline.
//!
//! A `HistoryEvent` is created by an earlier pass over a transaction (for
//! example a generic ERC-20 transfer decoder) and later refined in place by
//! protocol decoders that recognize the surrounding logs.

use alloy_primitives::B256;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::AssetId;

/// The economic kind of a history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventType {
    Trade,
    Staking,
    Deposit,
    Withdrawal,
    Transfer,
    Spend,
    Receive,
    Adjustment,
    Informational,
    Migrate,
    Renew,
    Unknown,
}

impl fmt::Display for HistoryEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoryEventType::Trade => "trade",
            HistoryEventType::Staking => "staking",
            HistoryEventType::Deposit => "deposit",
            HistoryEventType::Withdrawal => "withdrawal",
            HistoryEventType::Transfer => "transfer",
            HistoryEventType::Spend => "spend",
            HistoryEventType::Receive => "receive",
            HistoryEventType::Adjustment => "adjustment",
            HistoryEventType::Informational => "informational",
            HistoryEventType::Migrate => "migrate",
            HistoryEventType::Renew => "renew",
            HistoryEventType::Unknown => "unknown",
        };
        f.pad(s)
    }
}

/// Refinement of a [`HistoryEventType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventSubType {
    #[default]
    None,
    Reward,
    DepositAsset,
    RemoveAsset,
    Fee,
    Spend,
    Receive,
    Approve,
    Airdrop,
    Bridge,
    Governance,
    Donate,
    GenerateDebt,
    PaybackDebt,
    Liquidate,
}

impl fmt::Display for HistoryEventSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoryEventSubType::None => "none",
            HistoryEventSubType::Reward => "reward",
            HistoryEventSubType::DepositAsset => "deposit asset",
            HistoryEventSubType::RemoveAsset => "remove asset",
            HistoryEventSubType::Fee => "fee",
            HistoryEventSubType::Spend => "spend",
            HistoryEventSubType::Receive => "receive",
            HistoryEventSubType::Approve => "approve",
            HistoryEventSubType::Airdrop => "airdrop",
            HistoryEventSubType::Bridge => "bridge",
            HistoryEventSubType::Governance => "governance",
            HistoryEventSubType::Donate => "donate",
            HistoryEventSubType::GenerateDebt => "generate debt",
            HistoryEventSubType::PaybackDebt => "payback debt",
            HistoryEventSubType::Liquidate => "liquidate",
        };
        f.pad(s)
    }
}

/// Amount of an asset plus its USD valuation at the time of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: BigDecimal,
    #[serde(default)]
    pub usd_value: BigDecimal,
}

impl Balance {
    pub fn new(amount: BigDecimal) -> Self {
        Self {
            amount,
            usd_value: BigDecimal::default(),
        }
    }
}

/// The set of fields a protocol decoder writes when it claims an event.
///
/// Built completely before being applied so an event is never left with some
/// of the fields updated and others stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub event_subtype: HistoryEventSubType,
    pub counterparty: String,
    pub notes: String,
}

/// A single accounting event within a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Transaction hash the event belongs to
    pub event_identifier: B256,
    /// Position of the event within the transaction's decoded events
    pub sequence_index: u32,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Checksummed address of the tracked account acting in this event
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location_label: Option<String>,
    pub asset: AssetId,
    pub balance: Balance,
    pub event_type: HistoryEventType,
    #[serde(default)]
    pub event_subtype: HistoryEventSubType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub counterparty: Option<String>,
}

impl HistoryEvent {
    /// Apply a decoder's enrichment. Amount, asset, and type stay untouched.
    pub fn apply_enrichment(&mut self, enrichment: Enrichment) {
        let Enrichment {
            event_subtype,
            counterparty,
            notes,
        } = enrichment;
        self.event_subtype = event_subtype;
        self.counterparty = Some(counterparty);
        self.notes = Some(notes);
    }
}
