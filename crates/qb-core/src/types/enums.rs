//! Enumerations for the dashboard's sortable columns and sort direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QbError;

// ---------------------------------------------------------------------------
// Sort field
// ---------------------------------------------------------------------------

/// A sortable table column.
///
/// Company and Market Cap are displayed but deliberately not sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Ticker,
    Price,
    AbsoluteChange,
    PercentChange,
    Volume,
}

impl SortField {
    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ticker => "Symbol",
            Self::Price => "Price",
            Self::AbsoluteChange => "Change",
            Self::PercentChange => "Change %",
            Self::Volume => "Volume",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticker => write!(f, "ticker"),
            Self::Price => write!(f, "price"),
            Self::AbsoluteChange => write!(f, "change"),
            Self::PercentChange => write!(f, "percent"),
            Self::Volume => write!(f, "volume"),
        }
    }
}

impl FromStr for SortField {
    type Err = QbError;

    /// Accepts the column names a user would type, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ticker" | "symbol" | "sym" => Ok(Self::Ticker),
            "price" => Ok(Self::Price),
            "change" | "chg" | "absolute_change" => Ok(Self::AbsoluteChange),
            "percent" | "pct" | "change%" | "%" | "percent_change" | "changepercent" => {
                Ok(Self::PercentChange)
            }
            "volume" | "vol" => Ok(Self::Volume),
            "company" | "name" | "market_cap" | "marketcap" | "mcap" | "cap" => {
                Err(QbError::Parse(format!("column `{}` is not sortable", s.trim())))
            }
            other => Err(QbError::Parse(format!("unknown column `{other}`"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header indicator for the active sort column.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}
