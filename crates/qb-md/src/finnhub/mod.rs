//! Finnhub quote provider.
//!
//! # REST endpoints
//!
//! | Operation | Method | Path                                      |
//! |-----------|--------|-------------------------------------------|
//! | Quote     | GET    | `/quote?symbol={ticker}&token={key}`      |
//! | Profile   | GET    | `/stock/profile2?symbol={ticker}&token={key}` |
//!
//! The key travels as a query parameter, so request URLs are never logged.

pub mod config;
pub mod json_parser;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use qb_core::error::QbError;
use tracing::debug;

use self::config::FinnhubConfig;
use crate::{ProviderProfile, ProviderQuote, QuoteProvider};

const QUOTE_PATH: &str = "/quote";
const PROFILE_PATH: &str = "/stock/profile2";

/// Finnhub REST client.
///
/// Holds one pooled [`reqwest::Client`]; cheap to share behind an `Arc`
/// across all per-symbol tasks of a cycle.
pub struct FinnhubClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// REST base URL (e.g. `https://finnhub.io/api/v1`).
    base_url: String,
    /// API key (sent as the `token` query parameter).
    api_key: String,
}

impl FinnhubClient {
    /// Create a client with the configured per-request timeout.
    pub fn new(config: FinnhubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("quoteboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base_url: config.base_url, api_key: config.api_key })
    }

    /// GET `{base}{path}?symbol=..&token=..` and return the body text.
    ///
    /// Non-2xx responses become errors carrying the status and body, which for
    /// Finnhub holds the `{"error": ...}` explanation (rate limit, bad key).
    async fn get_text(&self, path: &str, ticker: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .query(&[("symbol", ticker), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| anyhow!("{path} request failed for {ticker}: {}", e.without_url()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| anyhow!("{path} body read failed for {ticker}: {}", e.without_url()))?;

        if !status.is_success() {
            return Err(QbError::Provider(format!("{path} HTTP {status} for {ticker}: {}", body.trim())).into());
        }

        debug!("[finnhub] {path} {ticker} -> {} bytes", body.len());
        Ok(body)
    }
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    fn name(&self) -> &str {
        "finnhub"
    }

    async fn quote(&self, ticker: &str) -> Result<ProviderQuote> {
        let body = self.get_text(QUOTE_PATH, ticker).await?;
        json_parser::parse_quote(&body).with_context(|| format!("bad quote payload for {ticker}"))
    }

    async fn profile(&self, ticker: &str) -> Result<ProviderProfile> {
        let body = self.get_text(PROFILE_PATH, ticker).await?;
        json_parser::parse_profile(&body).with_context(|| format!("bad profile payload for {ticker}"))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    const KEY: &str = "test-key";

    /// Serve one canned HTTP response on a local port. The task yields the
    /// request head it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let task = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            sock.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (base_url, task)
    }

    fn client(base_url: String) -> FinnhubClient {
        FinnhubClient::new(FinnhubConfig {
            base_url,
            api_key: KEY.to_string(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn quote_ok() {
        let (base, server) = serve_once("200 OK", r#"{"c":189.84,"d":-1.27,"dp":-0.6646}"#).await;
        let q = client(base).quote("AAPL").await.unwrap();
        assert_eq!(q.price, Some(189.84));
        assert_eq!(q.change, Some(-1.27));
        assert_eq!(q.percent_change, Some(-0.6646));

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /quote?symbol=AAPL&token=test-key HTTP/1.1"), "{head}");
    }

    #[tokio::test]
    async fn profile_path_and_params() {
        let (base, server) =
            serve_once("200 OK", r#"{"name":"Apple Inc","marketCapitalization":2950.12}"#).await;
        let p = client(base).profile("AAPL").await.unwrap();
        assert_eq!(p.name.as_deref(), Some("Apple Inc"));
        assert_eq!(p.market_cap_billions, Some(2950.12));

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /stock/profile2?symbol=AAPL&token=test-key HTTP/1.1"), "{head}");
    }

    #[tokio::test]
    async fn non_2xx_carries_body() {
        let (base, server) =
            serve_once("429 Too Many Requests", r#"{"error":"API limit reached"}"#).await;
        let err = client(base).quote("AAPL").await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("429"), "{msg}");
        assert!(msg.contains("API limit reached"), "{msg}");
        assert!(!msg.contains(KEY), "{msg}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn transport_error_hides_key() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client(base).profile("AAPL").await.unwrap_err();
        assert!(!format!("{err:#}").contains(KEY));
    }
}
