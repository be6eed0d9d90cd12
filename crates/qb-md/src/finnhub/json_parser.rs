//! Finnhub JSON payload parser.
//!
//! - `/quote` → [`ProviderQuote`]: `{ "c": price, "d": change, "dp": percent, "error"?: msg }`
//! - `/stock/profile2` → [`ProviderProfile`]: `{ "name"?: str, "marketCapitalization"?: number }`
//!
//! Unknown symbols yield a quote with `c = 0` and `d`/`dp` = `null`, and an
//! empty `{}` profile; both parse successfully and are judged later by the
//! acquisition merge.

use anyhow::{Result, anyhow};

use crate::json_util::{parse_f64_field, parse_str_field};
use crate::{ProviderProfile, ProviderQuote};

/// Parse a `/quote` response body.
pub fn parse_quote(text: &str) -> Result<ProviderQuote> {
    let v: serde_json::Value = serde_json::from_str(text)?;
    if !v.is_object() {
        return Err(anyhow!("quote payload is not a JSON object"));
    }

    Ok(ProviderQuote {
        price: parse_f64_field(&v, "c"),
        change: parse_f64_field(&v, "d"),
        percent_change: parse_f64_field(&v, "dp"),
        error: parse_str_field(&v, "error"),
    })
}

/// Parse a `/stock/profile2` response body.
pub fn parse_profile(text: &str) -> Result<ProviderProfile> {
    let v: serde_json::Value = serde_json::from_str(text)?;
    if !v.is_object() {
        return Err(anyhow!("profile payload is not a JSON object"));
    }

    Ok(ProviderProfile {
        name: parse_str_field(&v, "name"),
        market_cap_billions: parse_f64_field(&v, "marketCapitalization"),
    })
}
