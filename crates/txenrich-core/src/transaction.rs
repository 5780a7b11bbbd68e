//! Transactions and receipt logs as handed to decoders.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;

/// A single log emitted during a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmTxReceiptLog {
    /// Index of the log within the receipt
    pub log_index: u32,
    /// Non-indexed parameters, ABI-encoded
    #[serde(default)]
    pub data: Bytes,
    /// Contract that emitted the log
    pub address: Address,
    /// topics[0] is the event signature hash; topics[1..] are indexed params
    #[serde(default)]
    pub topics: Vec<B256>,
}

impl EvmTxReceiptLog {
    /// The event signature word, if the log has any topics.
    pub fn signature(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// Transaction context passed alongside each log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmTransaction {
    pub tx_hash: B256,
    #[serde(default)]
    pub chain: ChainId,
    pub block_number: u64,
    /// Block timestamp (Unix seconds, UTC)
    pub timestamp: i64,
    pub from_address: Address,
    /// `None` for contract creation
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to_address: Option<Address>,
    #[serde(default)]
    pub value: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_first_topic() {
        let log = EvmTxReceiptLog {
            log_index: 0,
            data: Bytes::new(),
            address: Address::ZERO,
            topics: vec![B256::repeat_byte(1), B256::repeat_byte(2)],
        };
        assert_eq!(log.signature(), Some(&B256::repeat_byte(1)));

        let empty = EvmTxReceiptLog { topics: vec![], ..log };
        assert!(empty.signature().is_none());
    }

    #[test]
    fn log_deserializes_from_hex_json() {
        let json = r#"{
            "log_index": 7,
            "data": "0x0000000000000000000000000000000000000000000000000000000000000001",
            "address": "0x378ba9b73309be80bf4c2c027aad799766a7ed5a",
            "topics": ["0x4766921f5c59646d22d7d266a29164c8e9623684d8dfdbd931731dfdca025238"]
        }"#;
        let log: EvmTxReceiptLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.log_index, 7);
        assert_eq!(log.data.len(), 32);
        assert_eq!(log.topics.len(), 1);
    }
}
