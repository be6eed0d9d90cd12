//! Acquisition status — decides which screen the dashboard shows.

use super::quote::QuoteRecord;

/// Tri-state status of the most recent acquisition cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AcquisitionStatus {
    /// A cycle is in flight and no result has been applied yet.
    #[default]
    Loading,
    /// The latest cycle failed; carries the user-facing message.
    Error(String),
    /// The latest cycle succeeded with at least one record.
    Ready {
        records: Vec<QuoteRecord>,
        /// Completion time, milliseconds since the Unix epoch.
        fetched_at_ms: u64,
    },
}

impl AcquisitionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Records of a ready status; empty otherwise.
    pub fn records(&self) -> &[QuoteRecord] {
        match self {
            Self::Ready { records, .. } => records,
            _ => &[],
        }
    }

    pub fn fetched_at_ms(&self) -> Option<u64> {
        match self {
            Self::Ready { fetched_at_ms, .. } => Some(*fetched_at_ms),
            _ => None,
        }
    }
}
