//! Wall-clock helpers for cycle timestamps and the "Last updated" label.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

/// Current time as **milliseconds** since Unix epoch.
#[inline]
pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}

/// Render epoch milliseconds as local wall-clock `HH:MM:SS`.
///
/// Returns `"--:--:--"` for timestamps chrono cannot represent.
pub fn format_clock(epoch_ms: u64) -> String {
    match i64::try_from(epoch_ms).ok().and_then(DateTime::from_timestamp_millis) {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
