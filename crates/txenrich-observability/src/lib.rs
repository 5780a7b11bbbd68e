//! # txenrich-observability
//!
//! Structured logging for txenrich binaries. Decoder crates only emit
//! `tracing` events; this crate installs the subscriber that formats them.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
