//! Provider registry — factory for creating quote providers from config.

use std::sync::Arc;

use anyhow::Result;
use qb_core::config::ProviderConfig;
use qb_core::error::QbError;

use crate::QuoteProvider;
use crate::finnhub::FinnhubClient;
use crate::finnhub::config::FinnhubConfig;

/// Create a [`QuoteProvider`] based on the `name` field of the provider
/// config, reading the API key from the process environment.
///
/// Unknown provider names fail with [`QbError::Config`].
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn QuoteProvider>> {
    create_provider_with_env(config, |k| std::env::var(k).ok())
}

/// Same as [`create_provider`] with an explicit environment lookup.
pub fn create_provider_with_env(
    config: &ProviderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn QuoteProvider>> {
    let name = config.effective_name().to_lowercase();

    match name.as_str() {
        "finnhub" => {
            let cfg = FinnhubConfig::from_provider_with_env(config, lookup)?;
            Ok(Arc::new(FinnhubClient::new(cfg)?))
        }
        other => Err(QbError::Config(format!("unknown provider `{other}`")).into()),
    }
}
