//! Golden fixture integration tests.
//!
//! Each test loads a recorded transaction from `fixtures/`, runs it through a
//! decoder table, and compares the resulting events with the expectations
//! stored in the fixture JSON.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use txenrich_core::{
    asset::{AssetsConfig, MemoryAssetResolver},
    event::{HistoryEvent, HistoryEventSubType},
    transaction::{EvmTransaction, EvmTxReceiptLog},
};
use txenrich_evm::{votium::CPT_VOTIUM, DecoderTable, VotiumDecoder};

// ─── Helpers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Expected {
    sequence_index: u32,
    event_subtype: HistoryEventSubType,
    counterparty: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    transaction: EvmTransaction,
    logs: Vec<EvmTxReceiptLog>,
    events: Vec<HistoryEvent>,
    expected: Vec<Expected>,
}

/// The fixtures live two levels above the crate root.
fn fixture_path(rel: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures");
    p.push(rel);
    p
}

fn load_fixture(rel: &str) -> Fixture {
    let json = std::fs::read_to_string(fixture_path(rel)).expect("fixture not found");
    serde_json::from_str(&json).expect("fixture is not valid JSON")
}

fn table() -> DecoderTable {
    let config = AssetsConfig::from_file(&fixture_path("assets.yaml")).expect("assets.yaml");
    let resolver = MemoryAssetResolver::from_config(&config).expect("asset registry");

    let mut table = DecoderTable::new();
    table
        .register(Arc::new(VotiumDecoder::with_tracing_notifier(Arc::new(resolver))))
        .expect("register votium");
    table
}

// ─── Votium claim ─────────────────────────────────────────────────────────────

#[test]
fn votium_claim_golden() {
    let fixture = load_fixture("votium/claim.json");
    let table = table();
    assert_eq!(table.counterparties(), &[CPT_VOTIUM]);

    let mut events = fixture.events.clone();
    let pending = table.decode_transaction(&fixture.transaction, &fixture.logs, &mut events);

    assert!(pending.is_empty(), "unexpected action items: {pending:?}");
    assert_eq!(events.len(), fixture.events.len(), "no event may be added");

    for (event, expected) in events.iter().zip(&fixture.expected) {
        assert_eq!(event.sequence_index, expected.sequence_index);
        assert_eq!(event.event_subtype, expected.event_subtype, "subtype of #{}", expected.sequence_index);
        assert_eq!(event.counterparty, expected.counterparty, "counterparty of #{}", expected.sequence_index);
        assert_eq!(event.notes, expected.notes, "notes of #{}", expected.sequence_index);
    }

    // amounts and assets are keys, never rewritten
    for (after, before) in events.iter().zip(&fixture.events) {
        assert_eq!(after.balance, before.balance);
        assert_eq!(after.asset, before.asset);
        assert_eq!(after.event_type, before.event_type);
    }
}

#[test]
fn votium_claim_golden_is_stable_on_rerun() {
    let fixture = load_fixture("votium/claim.json");
    let table = table();

    let mut events = fixture.events.clone();
    table.decode_transaction(&fixture.transaction, &fixture.logs, &mut events);
    let first = events.clone();
    table.decode_transaction(&fixture.transaction, &fixture.logs, &mut events);

    assert_eq!(events, first);
}

#[test]
fn claim_log_payload_layout() {
    let fixture = load_fixture("votium/claim.json");
    let claim = fixture
        .logs
        .iter()
        .find(|log| log.address == txenrich_evm::votium::VOTIUM_CONTRACT)
        .expect("claim log");

    let raw = hex::encode(&claim.data[32..64]);
    assert_eq!(
        raw,
        "0000000000000000000000000000000000000000000000001bc16d674ec80000"
    );
    let amount = txenrich_evm::extract::data_to_u256(&claim.data, 32..64).unwrap();
    assert_eq!(amount.to_string(), "2000000000000000000");
}
