//! Configuration parsing for quoteboard.
//!
//! Settings come from an optional JSON file. Every field is optional; the
//! `effective_*` helpers supply defaults. The provider credential is never
//! compiled in: it is read from the environment variable named by
//! `provider.api_key_env` (default `FINNHUB_API_KEY`) or, failing that, from
//! `provider.api_key`.
//!
//! # Example config
//!
//! ```json
//! {
//!   "app": { "module_name": "quoteboard", "log_path": "/tmp/log" },
//!   "provider": {
//!     "name": "finnhub",
//!     "base_url": "https://finnhub.io/api/v1",
//!     "api_key_env": "FINNHUB_API_KEY",
//!     "request_timeout_ms": 10000
//!   },
//!   "acquisition": { "stagger_ms": 200 },
//!   "symbols": [{ "ticker": "AAPL", "name": "Apple Inc." }]
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::QbError;
use crate::types::{SymbolEntry, SymbolRegistry};

/// Default environment variable holding the provider API key.
pub const DEFAULT_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Module metadata (name, log path).
    pub app: Option<ModuleMeta>,

    /// Quote provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Acquisition cycle settings.
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Symbol registry override; the built-in equities are used when absent.
    pub symbols: Option<Vec<SymbolEntry>>,
}

/// Module metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleMeta {
    pub module_name: Option<String>,
    pub log_path: Option<String>,
}

/// Quote provider configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// Provider identifier. Only `"finnhub"` is supported.
    pub name: Option<String>,

    /// REST base URL override.
    pub base_url: Option<String>,

    /// API key. Prefer the environment variable; this is a fallback.
    pub api_key: Option<String>,

    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,

    /// Per-request timeout in milliseconds (default: 10_000).
    pub request_timeout_ms: Option<u64>,
}

impl ProviderConfig {
    pub fn effective_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "finnhub".to_string())
    }

    pub fn effective_api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn effective_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(10_000))
    }

    /// Resolve the API key: environment first, then the config file.
    ///
    /// `lookup` reads an environment variable; production code passes
    /// `|k| std::env::var(k).ok()`.
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, QbError> {
        let env_name = self.effective_api_key_env();
        lookup(env_name)
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .map(|k| k.trim().to_string())
            .ok_or_else(|| {
                QbError::Config(format!(
                    "no API key: set the {env_name} environment variable or provider.api_key"
                ))
            })
    }
}

/// Acquisition cycle configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcquisitionConfig {
    /// Delay between the start of consecutive symbols' requests, in
    /// milliseconds (default: 200).
    pub stagger_ms: Option<u64>,
}

impl AcquisitionConfig {
    pub fn effective_stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms.unwrap_or(200))
    }
}

impl AppConfig {
    /// Returns the module name, used as log file prefix.
    pub fn module_name(&self) -> String {
        self.app
            .as_ref()
            .and_then(|m| m.module_name.clone())
            .unwrap_or_else(|| "quoteboard".to_string())
    }

    /// Returns the log path.
    pub fn log_path(&self) -> Option<String> {
        self.app.as_ref().and_then(|m| m.log_path.clone())
    }

    /// Build the symbol registry from the override list or the built-in one.
    pub fn registry(&self) -> Result<SymbolRegistry, QbError> {
        match &self.symbols {
            Some(list) if list.is_empty() => {
                Err(QbError::Config("`symbols` must not be empty".to_string()))
            }
            Some(list) => SymbolRegistry::new(list.clone()),
            None => Ok(SymbolRegistry::default_equities()),
        }
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse a JSON config document.
pub fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.module_name(), "quoteboard");
        assert!(cfg.log_path().is_none());
        assert_eq!(cfg.provider.effective_name(), "finnhub");
        assert_eq!(cfg.provider.effective_api_key_env(), "FINNHUB_API_KEY");
        assert_eq!(cfg.provider.effective_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.acquisition.effective_stagger(), Duration::from_millis(200));
        assert_eq!(cfg.registry().unwrap().len(), 15);
    }

    #[test]
    fn full_config() {
        let json = r#"{
            "app": { "module_name": "qb-test", "log_path": "/tmp/qb" },
            "provider": { "name": "finnhub", "api_key": "abc", "request_timeout_ms": 500 },
            "acquisition": { "stagger_ms": 50 },
            "symbols": [
                { "ticker": "AAPL", "name": "Apple Inc." },
                { "ticker": "msft", "display_name": "Microsoft" }
            ]
        }"#;
        let cfg = parse_config(json).unwrap();
        assert_eq!(cfg.module_name(), "qb-test");
        assert_eq!(cfg.log_path().as_deref(), Some("/tmp/qb"));
        assert_eq!(cfg.provider.effective_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.acquisition.effective_stagger(), Duration::from_millis(50));
        let reg = cfg.registry().unwrap();
        assert_eq!(reg.len(), 2);
        let msft = reg.iter().nth(1).unwrap();
        assert_eq!((msft.ticker.as_str(), msft.name.as_str()), ("MSFT", "Microsoft"));
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let cfg = ProviderConfig { api_key: Some("from-file".into()), ..Default::default() };
        let key = cfg
            .resolve_api_key(|name| (name == "FINNHUB_API_KEY").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key, "from-env");

        let key = cfg.resolve_api_key(|_| None).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn custom_env_name_and_blank_values() {
        let cfg = ProviderConfig {
            api_key: Some("  ".into()),
            api_key_env: Some("QB_KEY".into()),
            ..Default::default()
        };
        let err = cfg.resolve_api_key(|_| Some(String::new())).unwrap_err();
        assert!(err.to_string().contains("QB_KEY"));

        let key = cfg.resolve_api_key(|name| (name == "QB_KEY").then(|| " k1 ".to_string())).unwrap();
        assert_eq!(key, "k1");
    }

    #[test]
    fn empty_symbol_override_rejected() {
        let cfg = parse_config(r#"{ "symbols": [] }"#).unwrap();
        assert!(cfg.registry().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_config("{ not json").is_err());
    }
}
