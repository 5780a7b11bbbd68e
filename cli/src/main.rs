//! txenrich CLI: run the protocol decoders over a recorded transaction.
//!
//! # Commands
//! ```text
//! txenrich decode         --input <tx.json> --assets <assets.yaml> [--json]
//! txenrich decoders
//! txenrich signature      "Claimed(address,uint256,uint256,address,uint256)"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use txenrich_core::{
    asset::MemoryAssetResolver,
    event::HistoryEvent,
    transaction::{EvmTransaction, EvmTxReceiptLog},
};
use txenrich_evm::{signature::event_signature, DecoderTable, VotiumDecoder};
use txenrich_observability::{init_tracing, LogConfig};

#[derive(Parser)]
#[command(
    name = "txenrich",
    about = "Enrich decoded EVM history events with protocol-specific meaning",
    version
)]
struct Cli {
    /// Global log level: trace | debug | info | warn | error
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit JSON structured logs
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a transaction file and print the resulting events
    Decode {
        /// JSON file with `transaction`, `logs`, and already decoded `events`
        #[arg(short, long)]
        input: PathBuf,
        /// YAML asset list used for token resolution
        #[arg(short, long, default_value = "./fixtures/assets.yaml")]
        assets: PathBuf,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the contract addresses and counterparties the decoders handle
    Decoders,

    /// Print the topics[0] hash of an event signature
    Signature {
        /// Canonical signature, e.g. "Transfer(address,address,uint256)"
        signature: String,
    },
}

/// Transaction file accepted by `decode`.
#[derive(Debug, Deserialize)]
struct TransactionFile {
    transaction: EvmTransaction,
    logs: Vec<EvmTxReceiptLog>,
    #[serde(default)]
    events: Vec<HistoryEvent>,
}

fn build_table(resolver: MemoryAssetResolver) -> Result<DecoderTable> {
    let mut table = DecoderTable::new();
    table
        .register(Arc::new(VotiumDecoder::with_tracing_notifier(Arc::new(resolver))))
        .context("registering votium decoder")?;
    Ok(table)
}

fn cmd_decode(input: &Path, assets: &Path, json: bool) -> Result<()> {
    let resolver = MemoryAssetResolver::from_file(assets)
        .with_context(|| format!("loading assets from {}", assets.display()))?;
    tracing::info!(assets = resolver.len(), "loaded asset registry");

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let file: TransactionFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", input.display()))?;

    let table = build_table(resolver)?;
    let mut events = file.events;
    let pending = table.decode_transaction(&file.transaction, &file.logs, &mut events);
    if !pending.is_empty() {
        tracing::warn!(count = pending.len(), "unconsumed action items");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("Transaction {}", file.transaction.tx_hash);
    for event in &events {
        println!(
            "  #{:<3} {:<8} {:<14} {:>24} {:<12} {}",
            event.sequence_index,
            event.event_type,
            event.event_subtype,
            event.balance.amount,
            event.counterparty.as_deref().unwrap_or("-"),
            event.notes.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn cmd_decoders() -> Result<()> {
    let table = build_table(MemoryAssetResolver::new())?;
    println!("Addresses handled: {}", table.len());
    for address in table.addresses() {
        println!("  {}", address.to_checksum(None));
    }
    println!("Counterparties:    {}", table.counterparties().join(", "));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogConfig {
        level: cli.log_level.clone(),
        json: cli.log_json,
        ..LogConfig::default()
    });

    match cli.command {
        Commands::Decode { input, assets, json } => cmd_decode(&input, &assets, json),
        Commands::Decoders => cmd_decoders(),
        Commands::Signature { signature } => {
            println!("{}", event_signature(&signature));
            Ok(())
        }
    }
}
