//! Trading-volume source.
//!
//! The basic Finnhub quote carries no volume. Until a real volume feed is
//! wired in, records get a **synthetic placeholder** drawn uniformly from
//! `[1_000_000, 51_000_000)`. Such records have `volume_synthetic = true` and
//! the dashboard labels the column as demo data. Do not read anything into
//! these numbers.

use std::ops::Range;

use rand::Rng;

/// Range of the synthetic placeholder.
pub const SYNTHETIC_VOLUME_RANGE: Range<u64> = 1_000_000..51_000_000;

/// Supplies a volume figure for each record.
pub trait VolumeSource: Send + Sync {
    /// Next volume value.
    fn next_volume(&self) -> u64;

    /// `true` if values are placeholders rather than market data.
    fn is_synthetic(&self) -> bool;
}

/// Uniform random placeholder volume. Not market data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticVolume;

impl VolumeSource for SyntheticVolume {
    fn next_volume(&self) -> u64 {
        rand::thread_rng().gen_range(SYNTHETIC_VOLUME_RANGE)
    }

    fn is_synthetic(&self) -> bool {
        true
    }
}

/// Constant volume, for deterministic runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedVolume(pub u64);

impl VolumeSource for FixedVolume {
    fn next_volume(&self) -> u64 {
        self.0
    }

    fn is_synthetic(&self) -> bool {
        true
    }
}
