//! Normalized quote record — one table row.

use serde::{Deserialize, Serialize};

/// A merged, normalized quote for one symbol, produced by one acquisition
/// cycle.
///
/// `price`, `absolute_change` and `percent_change` are already rounded to two
/// decimals. `ticker` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub ticker: String,
    pub display_name: String,
    pub price: f64,
    pub absolute_change: f64,
    pub percent_change: f64,
    pub volume: u64,
    /// `true` when `volume` is a generated placeholder rather than market data.
    pub volume_synthetic: bool,
    pub market_cap_label: String,
}

impl QuoteRecord {
    /// `true` when the symbol is flat or up on the session.
    pub fn is_gain(&self) -> bool {
        self.absolute_change >= 0.0
    }
}
