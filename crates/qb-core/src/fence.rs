//! Acquisition cycle fencing.
//!
//! A user may trigger a refresh while an earlier cycle is still in flight.
//! Both cycles then run to completion, and their results can arrive in any
//! order. Every cycle is tagged with a [`CycleId`] issued by a [`CycleFence`];
//! a result is accepted only if its id is the latest one issued, so a slow,
//! superseded cycle can never overwrite a newer one.

use std::fmt;

/// Monotonically increasing identifier of one acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues cycle ids and answers whether a given id is still current.
///
/// # Thread safety
///
/// Not thread-safe. Owned by the dashboard state, which is only written from
/// the event loop.
#[derive(Debug, Default)]
pub struct CycleFence {
    latest: u64,
}

impl CycleFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id. Ids start at 1 and strictly increase.
    pub fn issue(&mut self) -> CycleId {
        self.latest += 1;
        CycleId(self.latest)
    }

    /// Returns `true` if `id` is the most recently issued id.
    #[inline]
    pub fn is_current(&self, id: CycleId) -> bool {
        self.latest != 0 && id.0 == self.latest
    }
}
