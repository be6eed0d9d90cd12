//! Typed error definitions for quoteboard.
//!
//! Provides [`QbError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate with `anyhow::Result`.

use thiserror::Error;

/// Message shown when an acquisition cycle produced no usable record.
pub const NO_DATA_MESSAGE: &str =
    "No stock data could be retrieved. Please check your API key or try again later.";

/// Message shown when a cycle failed for a reason without its own description.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch stock data. Please try again.";

/// Domain-specific errors for quoteboard.
#[derive(Debug, Error)]
pub enum QbError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Symbol registry construction error (empty or duplicate tickers).
    #[error("registry error: {0}")]
    Registry(String),

    /// Quote provider transport or protocol error.
    #[error("provider error: {0}")]
    Provider(String),

    /// Provider payload parsing error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Every symbol of an acquisition cycle failed.
    #[error("{}", NO_DATA_MESSAGE)]
    NoData,
}
