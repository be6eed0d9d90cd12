//! # qb-core
//!
//! Core crate for the quoteboard dashboard, providing:
//!
//! - **Types** (`types`) — symbol registry, quote records, sort enums, acquisition status
//! - **Formatting** (`format`) — rounding, market-cap labels, price/volume display strings
//! - **View derivation** (`view`) — pure filter + sort over quote records
//! - **Cycle fencing** (`fence`) — monotonic acquisition cycle identifiers
//! - **State** (`state`) — the dashboard state container and its update contract
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `QbError` via thiserror
//! - **Time utilities** (`time_util`) — wall-clock timestamps and clock labels
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod fence;
pub mod format;
pub mod logging;
pub mod state;
pub mod time_util;
pub mod types;
pub mod view;

// Re-export types at crate root for convenience.
pub use types::*;
