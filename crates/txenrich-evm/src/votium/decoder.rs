//! `VotiumDecoder`: enriches bribe receipts with Votium as counterparty.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::Arc;
use txenrich_core::{
    asset::{asset_normalized_value, AssetResolver, EvmToken},
    decoder::{
        decode_routine, ActionItem, DecodeRoutine, DecoderInterface, DecodingOutput, Notifier,
        TracingNotifier,
    },
    error::DecodeError,
    event::{Enrichment, HistoryEvent, HistoryEventSubType, HistoryEventType},
    transaction::{EvmTransaction, EvmTxReceiptLog},
};

use super::constants::{CPT_VOTIUM, VOTIUM_CLAIM, VOTIUM_CONTRACT, VOTIUM_PROTOCOL};
use crate::extract::{data_to_u256, topic_at, topic_to_address};

/// A decoded `Claimed` log. Lives only for the duration of one decode call.
#[derive(Debug)]
struct Claim {
    token: EvmToken,
    /// Checksummed receiver address
    receiver: String,
    amount: BigDecimal,
}

impl Claim {
    fn matches(&self, event: &HistoryEvent) -> bool {
        event.event_type == HistoryEventType::Receive
            && event.location_label.as_deref() == Some(self.receiver.as_str())
            && event.balance.amount == self.amount
            && event.asset == self.token.identifier
    }
}

/// Decoder for the Votium bribe distributor.
pub struct VotiumDecoder {
    assets: Arc<dyn AssetResolver>,
    notifier: Arc<dyn Notifier>,
}

impl VotiumDecoder {
    pub fn new(assets: Arc<dyn AssetResolver>, notifier: Arc<dyn Notifier>) -> Self {
        Self { assets, notifier }
    }

    /// Decoder that reports unresolvable assets as tracing warnings.
    pub fn with_tracing_notifier(assets: Arc<dyn AssetResolver>) -> Self {
        Self::new(assets, Arc::new(TracingNotifier))
    }

    /// Read the claim out of a log.
    ///
    /// `Ok(None)` means the log is not ours to decode: a different event, or
    /// a token the resolver does not know.
    fn extract_claim(&self, log: &EvmTxReceiptLog) -> Result<Option<Claim>, DecodeError> {
        if log.signature() != Some(&VOTIUM_CLAIM) {
            return Ok(None);
        }

        let token_address = topic_to_address(topic_at(log, 1)?);
        let Some(token) = self.assets.evm_address_to_asset(&token_address) else {
            tracing::debug!(
                token = %token_address,
                log_index = log.log_index,
                "votium claim of unknown token",
            );
            return Ok(None);
        };

        let receiver = topic_to_address(topic_at(log, 2)?).to_checksum(None);
        // data[0..32) is the merkle index; the claimed amount is the second word.
        let raw_amount = data_to_u256(&log.data, 32..64)?;
        let amount = asset_normalized_value(raw_amount, &token)?;

        Ok(Some(Claim {
            token,
            receiver,
            amount,
        }))
    }

    /// Decode a `Claimed` log, enriching every matching receive event.
    ///
    /// Never produces a new event or action item.
    pub fn decode_claim(
        &self,
        tx_log: &EvmTxReceiptLog,
        _transaction: &EvmTransaction,
        decoded_events: &mut [HistoryEvent],
        _all_logs: &[EvmTxReceiptLog],
        _action_items: Option<&[ActionItem]>,
    ) -> DecodingOutput {
        let claim = match self.extract_claim(tx_log) {
            Ok(Some(claim)) => claim,
            Ok(None) => return DecodingOutput::default(),
            Err(e) => {
                tracing::warn!(
                    log_index = tx_log.log_index,
                    error = %e,
                    "malformed votium claim log",
                );
                return DecodingOutput::default();
            }
        };

        for event in decoded_events.iter_mut().filter(|e| claim.matches(e)) {
            let crypto_asset = match self.assets.resolve_to_crypto_asset(&event.asset) {
                Ok(asset) => asset,
                Err(e) => {
                    tracing::debug!(error = %e, "votium claim matched an unresolvable asset");
                    self.notifier.notify_user(event, CPT_VOTIUM);
                    continue;
                }
            };

            let notes = format!(
                "Receive {} {} from {VOTIUM_PROTOCOL} bribe",
                event.balance.amount, crypto_asset.symbol,
            );
            event.apply_enrichment(Enrichment {
                event_subtype: HistoryEventSubType::Reward,
                counterparty: CPT_VOTIUM.to_string(),
                notes,
            });
            tracing::debug!(
                sequence_index = event.sequence_index,
                receiver = %claim.receiver,
                amount = %claim.amount,
                "enriched votium bribe",
            );
        }

        DecodingOutput::default()
    }
}

impl DecoderInterface for VotiumDecoder {
    fn addresses_to_decoders(self: Arc<Self>) -> HashMap<Address, Vec<DecodeRoutine>> {
        let claim = decode_routine(move |log, tx, events, all_logs, items| {
            self.decode_claim(log, tx, events, all_logs, items)
        });
        HashMap::from([(VOTIUM_CONTRACT, vec![claim])])
    }

    fn counterparties(&self) -> Vec<&'static str> {
        vec![CPT_VOTIUM]
    }
}
