//! Address-keyed decoder table.
//!
//! Built once at startup from every registered [`DecoderInterface`] and
//! read-only afterwards. Each log of a transaction is routed to the routines
//! bound to its emitting address.

use alloy_primitives::Address;
use std::collections::HashMap;
use std::sync::Arc;
use txenrich_core::{
    decoder::{ActionItem, DecodeRoutine, DecoderInterface, DecodingOutput},
    error::RegistryError,
    event::HistoryEvent,
    transaction::{EvmTransaction, EvmTxReceiptLog},
};

/// Fixed lookup table from contract address to decode routines.
#[derive(Default)]
pub struct DecoderTable {
    routines: HashMap<Address, Vec<DecodeRoutine>>,
    counterparties: Vec<&'static str>,
}

impl DecoderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoder's routines and counterparties.
    ///
    /// Fails without modifying the table if any of the decoder's addresses is
    /// already bound to another decoder.
    pub fn register(&mut self, decoder: Arc<dyn DecoderInterface>) -> Result<(), RegistryError> {
        let counterparties = decoder.counterparties();
        let mappings = decoder.addresses_to_decoders();

        if let Some(address) = mappings.keys().find(|a| self.routines.contains_key(*a)) {
            return Err(RegistryError::DuplicateAddress {
                address: address.to_checksum(None),
            });
        }

        for (address, routines) in mappings {
            tracing::debug!(%address, routines = routines.len(), "registered decoder address");
            self.routines.insert(address, routines);
        }
        for counterparty in counterparties {
            if !self.counterparties.contains(&counterparty) {
                self.counterparties.push(counterparty);
            }
        }
        Ok(())
    }

    /// Contract addresses with at least one routine.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.routines.keys()
    }

    /// Every counterparty identifier the registered decoders may attach.
    pub fn counterparties(&self) -> &[&'static str] {
        &self.counterparties
    }

    /// Number of contract addresses with at least one routine.
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Run the routines bound to `log.address`, in order.
    ///
    /// Only non-empty outputs are returned. Logs from unknown addresses
    /// produce nothing.
    pub fn decode_log(
        &self,
        log: &EvmTxReceiptLog,
        transaction: &EvmTransaction,
        decoded_events: &mut [HistoryEvent],
        all_logs: &[EvmTxReceiptLog],
        action_items: Option<&[ActionItem]>,
    ) -> Vec<DecodingOutput> {
        let Some(routines) = self.routines.get(&log.address) else {
            tracing::trace!(address = %log.address, log_index = log.log_index, "no decoder for address");
            return Vec::new();
        };

        routines
            .iter()
            .map(|routine| routine(log, transaction, decoded_events, all_logs, action_items))
            .filter(|output| !output.is_empty())
            .collect()
    }

    /// Run every log of a transaction through the table.
    ///
    /// New events are appended to `decoded_events`; action items produced by
    /// a log are visible to the logs after it. Returns the action items left
    /// at the end.
    pub fn decode_transaction(
        &self,
        transaction: &EvmTransaction,
        logs: &[EvmTxReceiptLog],
        decoded_events: &mut Vec<HistoryEvent>,
    ) -> Vec<ActionItem> {
        let mut pending: Vec<ActionItem> = Vec::new();

        for log in logs {
            let outputs = self.decode_log(
                log,
                transaction,
                decoded_events.as_mut_slice(),
                logs,
                Some(pending.as_slice()),
            );
            for output in outputs {
                if let Some(event) = output.event {
                    decoded_events.push(event);
                }
                pending.extend(output.action_items);
            }
        }

        tracing::debug!(
            tx_hash = %transaction.tx_hash,
            logs = logs.len(),
            events = decoded_events.len(),
            "decoded transaction",
        );
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, B256};
    use bigdecimal::BigDecimal;
    use txenrich_core::{
        asset::AssetId,
        decoder::decode_routine,
        event::{Balance, HistoryEventSubType, HistoryEventType},
    };

    const CONTRACT: Address = address!("1111111111111111111111111111111111111111");

    /// Produces one informational event per log it sees.
    struct EchoDecoder;

    impl DecoderInterface for EchoDecoder {
        fn addresses_to_decoders(self: Arc<Self>) -> HashMap<Address, Vec<DecodeRoutine>> {
            let routine = decode_routine(|log, tx, events, _all, _items| DecodingOutput {
                event: Some(HistoryEvent {
                    event_identifier: tx.tx_hash,
                    sequence_index: events.len() as u32 + log.log_index,
                    timestamp: tx.timestamp * 1000,
                    location_label: None,
                    asset: AssetId::new("ETH"),
                    balance: Balance::new(BigDecimal::from(0)),
                    event_type: HistoryEventType::Informational,
                    event_subtype: HistoryEventSubType::None,
                    notes: None,
                    counterparty: Some("echo".into()),
                }),
                action_items: vec![],
            });
            HashMap::from([(CONTRACT, vec![routine])])
        }

        fn counterparties(&self) -> Vec<&'static str> {
            vec!["echo"]
        }
    }

    fn tx() -> EvmTransaction {
        EvmTransaction {
            tx_hash: B256::repeat_byte(0x42),
            chain: Default::default(),
            block_number: 1,
            timestamp: 1_700_000_000,
            from_address: Address::ZERO,
            to_address: Some(CONTRACT),
            value: Default::default(),
        }
    }

    fn log_from(address: Address, log_index: u32) -> EvmTxReceiptLog {
        EvmTxReceiptLog {
            log_index,
            data: Bytes::new(),
            address,
            topics: vec![B256::ZERO],
        }
    }

    #[test]
    fn routes_by_address() {
        let mut table = DecoderTable::new();
        table.register(Arc::new(EchoDecoder)).unwrap();
        assert_eq!(table.addresses().collect::<Vec<_>>(), vec![&CONTRACT]);
        assert_eq!(table.counterparties(), &["echo"]);

        let logs = vec![log_from(CONTRACT, 0), log_from(Address::ZERO, 1)];
        let mut events = Vec::new();
        let pending = table.decode_transaction(&tx(), &logs, &mut events);

        assert!(pending.is_empty());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].counterparty.as_deref(), Some("echo"));
    }

    #[test]
    fn unknown_address_yields_nothing() {
        let table = DecoderTable::new();
        let log = log_from(CONTRACT, 0);
        let mut events = Vec::new();
        assert!(table.decode_log(&log, &tx(), &mut events, &[], None).is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_address_rejected() {
        let mut table = DecoderTable::new();
        table.register(Arc::new(EchoDecoder)).unwrap();
        let err = table.register(Arc::new(EchoDecoder)).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAddress { .. }));
        assert_eq!(table.len(), 1);
        assert_eq!(table.counterparties().len(), 1);
    }
}
