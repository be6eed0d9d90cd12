//! # qb-md
//!
//! Quote acquisition for the quoteboard dashboard.
//!
//! ## Architecture
//!
//! Each market-data vendor implements [`QuoteProvider`], which exposes the two
//! reads an acquisition cycle needs per symbol: a price quote and a company
//! profile. The generic [`acquisition::acquire`] engine staggers, runs and
//! joins those reads for the whole registry, and [`refresh::Refresher`] wraps
//! one cycle into a background task that reports back over a channel.
//!
//! ## Modules
//!
//! - [`finnhub`] — Finnhub REST client and payload parsing
//! - [`acquisition`] — per-symbol merge + staggered cycle
//! - [`refresh`] — cycle task spawning and [`refresh::CycleReport`] channel
//! - [`registry`] — provider factory from config
//! - [`volume`] — synthetic volume placeholder
//! - [`json_util`] — JSON parsing helpers

pub mod acquisition;
pub mod finnhub;
pub mod json_util;
pub mod refresh;
pub mod registry;
pub mod volume;

use anyhow::Result;
use async_trait::async_trait;

/// Price snapshot as reported by a provider, before normalization.
///
/// Every field is optional because providers omit or null them freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQuote {
    /// Current price.
    pub price: Option<f64>,
    /// Absolute change from the previous close.
    pub change: Option<f64>,
    /// Percent change from the previous close.
    pub percent_change: Option<f64>,
    /// Provider-reported error for this symbol.
    pub error: Option<String>,
}

/// Company metadata as reported by a provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderProfile {
    /// Company display name.
    pub name: Option<String>,
    /// Market capitalization in billions.
    pub market_cap_billions: Option<f64>,
}

/// Trait implemented by all quote providers.
///
/// Both reads take `&self` so one provider instance serves every concurrent
/// per-symbol task of a cycle.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Fetch the current quote for `ticker`.
    async fn quote(&self, ticker: &str) -> Result<ProviderQuote>;

    /// Fetch the company profile for `ticker`.
    async fn profile(&self, ticker: &str) -> Result<ProviderProfile>;
}
