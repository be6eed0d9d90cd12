//! Background refresh cycles.
//!
//! [`Refresher::trigger`] runs one acquisition cycle on a tokio task and
//! reports its outcome as a [`CycleReport`] tagged with the caller-issued
//! [`CycleId`]. The receiving side (the dashboard event loop) decides whether
//! the report is still current; this module never looks at the fence.

use std::sync::Arc;

use qb_core::error::GENERIC_FAILURE_MESSAGE;
use qb_core::fence::CycleId;
use qb_core::state::CycleOutcome;
use qb_core::time_util::now_ms;
use qb_core::SymbolRegistry;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::acquisition::{AcquireOptions, acquire};
use crate::volume::VolumeSource;
use crate::QuoteProvider;

/// Outcome of one finished acquisition cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Id issued when the cycle started.
    pub cycle: CycleId,
    /// Records, or the user-facing failure message.
    pub outcome: CycleOutcome,
    /// Wall-clock completion time (ms since epoch).
    pub finished_at_ms: u64,
}

/// Sender half of the cycle report channel.
pub type CycleReportSender = tokio::sync::mpsc::UnboundedSender<CycleReport>;

/// Receiver half of the cycle report channel.
pub type CycleReportReceiver = tokio::sync::mpsc::UnboundedReceiver<CycleReport>;

/// Spawns acquisition cycles and forwards their outcomes.
#[derive(Clone)]
pub struct Refresher {
    provider: Arc<dyn QuoteProvider>,
    registry: Arc<SymbolRegistry>,
    volume: Arc<dyn VolumeSource>,
    options: AcquireOptions,
    reports: CycleReportSender,
}

impl Refresher {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        registry: Arc<SymbolRegistry>,
        volume: Arc<dyn VolumeSource>,
        options: AcquireOptions,
        reports: CycleReportSender,
    ) -> Self {
        Self { provider, registry, volume, options, reports }
    }

    /// Start cycle `cycle` in the background.
    ///
    /// Exactly one [`CycleReport`] is sent for it, even if the cycle panics.
    pub fn trigger(&self, cycle: CycleId) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let registry = Arc::clone(&self.registry);
        let volume = Arc::clone(&self.volume);
        let options = self.options.clone();
        let reports = self.reports.clone();

        info!("[refresh] cycle {cycle} triggered");

        tokio::spawn(async move {
            let work = tokio::spawn(async move {
                acquire(provider, &registry, volume, &options).await
            });

            let outcome: CycleOutcome = match work.await {
                Ok(Ok(records)) => Ok(records),
                Ok(Err(e)) => {
                    error!("[refresh] cycle {cycle} failed: {e}");
                    Err(e.to_string())
                }
                Err(e) => {
                    error!("[refresh] cycle {cycle} aborted: {e}");
                    Err(GENERIC_FAILURE_MESSAGE.to_string())
                }
            };

            let report = CycleReport { cycle, outcome, finished_at_ms: now_ms() };
            if reports.send(report).is_err() {
                debug!("[refresh] cycle {cycle} finished after the dashboard shut down");
            }
        })
    }
}
