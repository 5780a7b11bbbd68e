//! Typed field extraction from raw log topics and data.
//!
//! All functions are pure and bounds-checked: a short payload is a decode
//! error, never a zero-filled value.

use alloy_primitives::{Address, B256, U256};
use std::ops::Range;
use txenrich_core::{error::DecodeError, transaction::EvmTxReceiptLog};

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;

/// Interpret a topic word as an address: the low-order 20 bytes.
///
/// The upper 12 bytes are padding and are ignored, not validated.
pub fn topic_to_address(topic: &B256) -> Address {
    Address::from_word(*topic)
}

/// Fetch `topics[index]` from a log.
pub fn topic_at(log: &EvmTxReceiptLog, index: usize) -> Result<&B256, DecodeError> {
    log.topics.get(index).ok_or(DecodeError::MissingTopic {
        index,
        got: log.topics.len(),
    })
}

/// Big-endian unsigned integer from `data[range]`.
pub fn data_to_u256(data: &[u8], range: Range<usize>) -> Result<U256, DecodeError> {
    let Range { start, end } = range;
    if end.saturating_sub(start) > WORD_SIZE {
        return Err(DecodeError::WordTooWide { start, end });
    }
    let bytes = data.get(start..end).ok_or(DecodeError::DataTooShort {
        start,
        end,
        len: data.len(),
    })?;
    U256::try_from_be_slice(bytes).ok_or(DecodeError::WordTooWide { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, Bytes};

    #[test]
    fn address_from_padded_topic() {
        let topic = b256!("000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(
            topic_to_address(&topic),
            address!("d8da6bf26964af9d7eed9e03e53415d37aa96045")
        );
    }

    #[test]
    fn dirty_padding_is_ignored() {
        let topic = b256!("ffffffffffffffffffffffffd8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(
            topic_to_address(&topic),
            address!("d8da6bf26964af9d7eed9e03e53415d37aa96045")
        );
    }

    #[test]
    fn second_word_is_read_big_endian() {
        let mut data = vec![0xffu8; 32];
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&2_000_000_000_000_000_000u64.to_be_bytes());
        data.extend_from_slice(&word);

        assert_eq!(
            data_to_u256(&data, 32..64).unwrap(),
            U256::from(2_000_000_000_000_000_000u64)
        );
        assert_eq!(data_to_u256(&data, 0..32).unwrap(), U256::MAX);
    }

    #[test]
    fn short_data_is_an_error() {
        let data = vec![0u8; 63];
        let err = data_to_u256(&data, 32..64).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DataTooShort { start: 32, end: 64, len: 63 }
        ));
        assert!(data_to_u256(&[], 0..32).is_err());
    }

    #[test]
    fn range_past_usize_end_is_an_error() {
        let data = vec![0u8; 64];
        assert!(matches!(
            data_to_u256(&data, usize::MAX - WORD_SIZE..usize::MAX),
            Err(DecodeError::DataTooShort { len: 64, .. })
        ));
        assert!(data_to_u256(&data, 40..8).is_err());
    }

    #[test]
    fn over_wide_range_is_an_error() {
        let data = vec![0u8; 64];
        assert!(matches!(
            data_to_u256(&data, 0..33),
            Err(DecodeError::WordTooWide { .. })
        ));
    }

    #[test]
    fn missing_topic_is_an_error() {
        let log = EvmTxReceiptLog {
            log_index: 0,
            data: Bytes::new(),
            address: Address::ZERO,
            topics: vec![B256::ZERO],
        };
        assert!(topic_at(&log, 0).is_ok());
        assert!(matches!(
            topic_at(&log, 2),
            Err(DecodeError::MissingTopic { index: 2, got: 1 })
        ));
    }
}
