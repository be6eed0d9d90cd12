//! Finnhub-specific configuration extraction.
//!
//! Converts the generic [`ProviderConfig`] into a validated [`FinnhubConfig`]:
//! default base URL, resolved API key and request timeout.

use std::time::Duration;

use anyhow::{Result, anyhow};
use qb_core::config::ProviderConfig;

/// Production REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Parsed Finnhub configuration.
#[derive(Clone)]
pub struct FinnhubConfig {
    /// REST base URL without trailing slash.
    pub base_url: String,
    /// API key sent as the `token` query parameter.
    pub api_key: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

// Manual impl keeps the key out of logs.
impl std::fmt::Debug for FinnhubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl FinnhubConfig {
    /// Extract Finnhub config from a [`ProviderConfig`], reading the API key
    /// from the process environment.
    pub fn from_provider(provider: &ProviderConfig) -> Result<Self> {
        Self::from_provider_with_env(provider, |k| std::env::var(k).ok())
    }

    /// Same as [`from_provider`](Self::from_provider) with an explicit
    /// environment lookup.
    pub fn from_provider_with_env(
        provider: &ProviderConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let raw_url = provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = validate_base_url(raw_url)?;
        let api_key = provider.resolve_api_key(lookup)?;

        Ok(Self { base_url, api_key, request_timeout: provider.effective_timeout() })
    }
}

/// Require an absolute http(s) URL; strip any trailing slash.
fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw).map_err(|e| anyhow!("invalid provider base_url `{raw}`: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(anyhow!("unsupported base_url scheme `{other}` (expected http or https)")),
    }
}
