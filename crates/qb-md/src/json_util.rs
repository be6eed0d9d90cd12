//! Shared JSON parsing helpers for provider payloads.

/// Parse a JSON value (string or number) as `f64`.
///
/// Providers sometimes encode numbers as JSON strings (`"189.5"`) and use
/// `null` for missing values; both are handled. Non-finite results are
/// rejected.
#[inline]
pub fn parse_str_f64(v: Option<&serde_json::Value>) -> Option<f64> {
    let v = v?;
    let parsed = if let Some(s) = v.as_str() { fast_float2::parse(s.trim()).ok() } else { v.as_f64() };
    parsed.filter(|x| x.is_finite())
}

/// Parse a named field on a JSON object as `f64` (string or number).
#[inline]
pub fn parse_f64_field(v: &serde_json::Value, key: &str) -> Option<f64> {
    parse_str_f64(v.get(key))
}

/// Read a named field as a non-blank, trimmed string.
pub fn parse_str_field(v: &serde_json::Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(|s| s.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
