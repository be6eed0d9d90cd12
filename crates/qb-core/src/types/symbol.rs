//! Symbol registry — the fixed, ordered universe of tickers the dashboard shows.
//!
//! Registry order is significant: it decides the request stagger order of an
//! acquisition cycle and the default row order of its result.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::QbError;

/// One registry entry: a ticker and the display name used when the provider
/// profile has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub ticker: String,
    #[serde(alias = "display_name")]
    pub name: String,
}

impl SymbolEntry {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self { ticker: ticker.into(), name: name.into() }
    }
}

/// Built-in equities, in display order.
const DEFAULT_EQUITIES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("NFLX", "Netflix Inc."),
    ("V", "Visa Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("BABA", "Alibaba Group"),
    ("JNJ", "Johnson & Johnson"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Co."),
    ("UNH", "UnitedHealth Group Inc."),
];

/// Ordered, duplicate-free list of [`SymbolEntry`] values.
///
/// Immutable once built. Iteration order is registry order.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    entries: Vec<SymbolEntry>,
}

impl SymbolRegistry {
    /// Build a registry, rejecting empty and duplicate tickers.
    ///
    /// Tickers are compared case-insensitively and stored upper-cased.
    pub fn new(entries: Vec<SymbolEntry>) -> Result<Self, QbError> {
        let mut seen = AHashSet::with_capacity(entries.len());
        let mut normalized = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.into_iter().enumerate() {
            let ticker = entry.ticker.trim().to_uppercase();
            if ticker.is_empty() {
                return Err(QbError::Registry(format!("entry {idx} has an empty ticker")));
            }
            if !seen.insert(ticker.clone()) {
                return Err(QbError::Registry(format!("duplicate ticker: {ticker}")));
            }
            normalized.push(SymbolEntry { ticker, name: entry.name.trim().to_string() });
        }

        Ok(Self { entries: normalized })
    }

    /// The built-in list of 15 large-cap equities.
    pub fn default_equities() -> Self {
        let entries = DEFAULT_EQUITIES.iter().map(|(t, n)| SymbolEntry::new(*t, *n)).collect();
        // The built-in table is unique by construction.
        Self::new(entries).unwrap_or_else(|_| Self { entries: Vec::new() })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
