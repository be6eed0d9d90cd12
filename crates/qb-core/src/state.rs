//! Dashboard state container.
//!
//! Holds the acquisition status, the view state and the cycle fence. Every
//! user action or cycle result goes through a method here that computes the
//! next state from the previous one; nothing else mutates it.

use tracing::{info, warn};

use crate::error::NO_DATA_MESSAGE;
use crate::fence::{CycleFence, CycleId};
use crate::types::{AcquisitionStatus, QuoteRecord, SortField};
use crate::view::{ViewState, derive_view};

/// Result of one acquisition cycle as seen by the state container:
/// records on success, a user-facing message on failure.
pub type CycleOutcome = Result<Vec<QuoteRecord>, String>;

#[derive(Debug, Default)]
pub struct Dashboard {
    status: AcquisitionStatus,
    view: ViewState,
    fence: CycleFence,
}

impl Dashboard {
    /// A fresh dashboard: loading, default view, no cycle issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard starting from a custom view (e.g. CLI `--query`/`--sort`).
    pub fn with_view(view: ViewState) -> Self {
        Self { view, ..Self::default() }
    }

    pub fn status(&self) -> &AcquisitionStatus {
        &self.status
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Start a new cycle: issues its id and switches to `Loading`.
    ///
    /// Any cycle still in flight is superseded from this point on.
    pub fn begin_cycle(&mut self) -> CycleId {
        let id = self.fence.issue();
        self.status = AcquisitionStatus::Loading;
        id
    }

    /// Apply the outcome of cycle `id`.
    ///
    /// Returns `false` (and leaves the state untouched) if `id` has been
    /// superseded by a later [`begin_cycle`](Self::begin_cycle). An empty
    /// success is never `Ready`; it becomes the no-data error.
    pub fn finish_cycle(&mut self, id: CycleId, outcome: CycleOutcome, finished_at_ms: u64) -> bool {
        if !self.fence.is_current(id) {
            info!("[state] discarding result of superseded cycle {id}");
            return false;
        }
        self.status = match outcome {
            Ok(records) if records.is_empty() => {
                warn!("[state] cycle {id} succeeded without records");
                AcquisitionStatus::Error(NO_DATA_MESSAGE.to_string())
            }
            Ok(records) => AcquisitionStatus::Ready { records, fetched_at_ms: finished_at_ms },
            Err(message) => AcquisitionStatus::Error(message),
        };
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.view = self.view.with_query(query);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.view = self.view.toggle_sort(field);
    }

    /// Rows to display; empty unless the status is `Ready`.
    pub fn visible(&self) -> Vec<&QuoteRecord> {
        derive_view(self.status.records(), &self.view)
    }

    /// Number of records held by the current status, before filtering.
    pub fn record_count(&self) -> usize {
        self.status.records().len()
    }
}
