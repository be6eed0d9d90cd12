//! Normalization and display formatting for quote values.
//!
//! [`round2`] and [`format_market_cap`] are part of record normalization and
//! run during acquisition; the remaining helpers only shape display strings.

/// Label used whenever a market capitalization is unavailable.
pub const MARKET_CAP_UNAVAILABLE: &str = "N/A";

/// Round to two decimal places (half away from zero).
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a market capitalization given in **billions**.
///
/// | input (billions) | output            |
/// |------------------|-------------------|
/// | `>= 1000`        | `"{v/1000:.1}T"`  |
/// | `[1, 1000)`      | `"{v:.1}B"`       |
/// | `< 1`            | `"{v*1000:.0}M"`  |
///
/// Absent, zero and non-finite values map to `"N/A"`.
pub fn format_market_cap(billions: Option<f64>) -> String {
    match billions {
        Some(v) if v.is_finite() && v != 0.0 => {
            if v >= 1000.0 {
                format!("{:.1}T", v / 1000.0)
            } else if v >= 1.0 {
                format!("{v:.1}B")
            } else {
                format!("{:.0}M", v * 1000.0)
            }
        }
        _ => MARKET_CAP_UNAVAILABLE.to_string(),
    }
}

/// Fixed two-decimal rendering with en-US thousands grouping (`1,234.50`).
pub fn format_price(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if value < 0.0 && fixed != "0.00" {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Price-style rendering with an explicit `+` for non-negative values.
pub fn format_signed(value: f64) -> String {
    if value >= 0.0 { format!("+{}", format_price(value)) } else { format_price(value) }
}

/// Signed percentage with two decimals and no grouping (`+1.25%`).
pub fn format_percent(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 { format!("+{value:.2}%") } else { format!("{value:.2}%") }
}

/// Compact volume: `12.3M`, `4.5K`, or a grouped integer below one thousand.
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        group_thousands(&volume.to_string())
    }
}

/// Insert `,` every three digits from the right of an ASCII digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
