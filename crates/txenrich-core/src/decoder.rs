//! The `DecoderInterface` trait and the types flowing through it.
//!
//! A protocol decoder advertises which contract addresses it handles and
//! hands back one [`DecodeRoutine`] per address. The surrounding pipeline
//! calls those routines for every log emitted by the address, passing the
//! events already decoded for the transaction so the routine can refine them
//! in place.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::asset::AssetId;
use crate::event::{HistoryEvent, HistoryEventSubType, HistoryEventType};
use crate::transaction::{EvmTransaction, EvmTxReceiptLog};

/// Whether an action item rewrites a matching event or drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Transform,
    Skip,
}

/// A deferred instruction for a later log of the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: ActionKind,
    pub sequence_index: u32,
    pub from_event_type: HistoryEventType,
    pub from_event_subtype: HistoryEventSubType,
    pub asset: AssetId,
    pub amount: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_event_type: Option<HistoryEventType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_event_subtype: Option<HistoryEventSubType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_counterparty: Option<String>,
}

/// What a decode routine hands back for one log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodingOutput {
    /// A newly created event, if the routine produced one
    pub event: Option<HistoryEvent>,
    /// Action items for later logs in the same transaction
    pub action_items: Vec<ActionItem>,
}

impl DecodingOutput {
    /// Returns `true` if the routine produced nothing.
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.action_items.is_empty()
    }
}

/// A decode routine bound to its decoder instance.
///
/// Arguments: the log being decoded, its transaction, the events decoded so
/// far (mutable, shared with other decoders), every log of the transaction,
/// and the pending action items.
pub type DecodeRoutine = Arc<
    dyn Fn(
            &EvmTxReceiptLog,
            &EvmTransaction,
            &mut [HistoryEvent],
            &[EvmTxReceiptLog],
            Option<&[ActionItem]>,
        ) -> DecodingOutput
        + Send
        + Sync,
>;

/// Wrap a closure as a [`DecodeRoutine`].
pub fn decode_routine<F>(f: F) -> DecodeRoutine
where
    F: Fn(
            &EvmTxReceiptLog,
            &EvmTransaction,
            &mut [HistoryEvent],
            &[EvmTxReceiptLog],
            Option<&[ActionItem]>,
        ) -> DecodingOutput
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Implemented by every protocol decoder.
///
/// Both methods are queried once, when the decoder table is built.
pub trait DecoderInterface: Send + Sync {
    /// Contract address → routines to run on its logs, in order.
    fn addresses_to_decoders(self: Arc<Self>) -> HashMap<Address, Vec<DecodeRoutine>>;

    /// Counterparty identifiers this decoder may attach to events.
    fn counterparties(&self) -> Vec<&'static str>;
}

/// Side channel for conditions an operator should hear about but that must
/// not interrupt decoding.
pub trait Notifier: Send + Sync {
    /// A decoder matched `event` but could not resolve its asset.
    fn notify_user(&self, event: &HistoryEvent, counterparty: &str);
}

/// Blanket impl so closures can be used as notifiers.
impl<F: Fn(&HistoryEvent, &str) + Send + Sync> Notifier for F {
    fn notify_user(&self, event: &HistoryEvent, counterparty: &str) {
        self(event, counterparty)
    }
}

/// Default notifier: emits a structured warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_user(&self, event: &HistoryEvent, counterparty: &str) {
        tracing::warn!(
            tx_hash = %event.event_identifier,
            sequence_index = event.sequence_index,
            asset = %event.asset,
            counterparty,
            "could not resolve asset of a matched event; leaving it undecoded",
        );
    }
}
