//! Acquisition cycle engine.
//!
//! One cycle fetches a quote and a profile for every registry symbol and
//! merges them into normalized [`QuoteRecord`]s.
//!
//! # Scheduling
//!
//! ```text
//! t = 0            AAPL: quote ┐ joint await ─► merge
//!                        profile┘
//! t = 1 × stagger  GOOGL: quote + profile ─► merge
//! t = 2 × stagger  MSFT:  ...
//!                  └──────── all-complete barrier ──► Vec<QuoteRecord> | NoData
//! ```
//!
//! Each symbol runs in its own tokio task, delayed by `index × stagger` from
//! the cycle start to stay under the provider's rate limit. The cycle waits
//! for every task; there is no cancellation.
//!
//! # Failure policy
//!
//! - quote error, provider error field, missing or zero price → symbol dropped
//! - profile error → record kept with the registry name and `"N/A"` market cap
//! - every symbol dropped → [`QbError::NoData`]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::future::join_all;
use qb_core::error::QbError;
use qb_core::format::{format_market_cap, round2};
use qb_core::{QuoteRecord, SymbolEntry, SymbolRegistry};
use tracing::{info, warn};

use crate::volume::VolumeSource;
use crate::{ProviderProfile, ProviderQuote, QuoteProvider};

/// Knobs of one acquisition cycle.
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// Delay between the start of consecutive symbols (default: 200ms).
    pub stagger: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self { stagger: Duration::from_millis(200) }
    }
}

/// Merge one symbol's quote and profile results into a record.
///
/// Returns `None` when the symbol must be dropped from the cycle. Every drop
/// or degradation is logged here; nothing is surfaced individually.
pub fn merge_record(
    entry: &SymbolEntry,
    quote: Result<ProviderQuote>,
    profile: Result<ProviderProfile>,
    volume: &dyn VolumeSource,
) -> Option<QuoteRecord> {
    let ticker = entry.ticker.as_str();

    let quote = match quote {
        Ok(q) => q,
        Err(e) => {
            warn!("[acquire] {ticker}: quote request failed, dropping: {e:#}");
            return None;
        }
    };
    if let Some(err) = &quote.error {
        warn!("[acquire] {ticker}: provider error, dropping: {err}");
        return None;
    }
    let price = match quote.price {
        Some(p) if p != 0.0 => p,
        _ => {
            warn!("[acquire] {ticker}: no usable price, dropping");
            return None;
        }
    };

    let profile = match profile {
        Ok(p) => p,
        Err(e) => {
            warn!("[acquire] {ticker}: profile request failed, using fallbacks: {e:#}");
            ProviderProfile::default()
        }
    };

    let display_name = profile
        .name
        .or_else(|| (!entry.name.is_empty()).then(|| entry.name.clone()))
        .unwrap_or_else(|| entry.ticker.clone());

    Some(QuoteRecord {
        ticker: entry.ticker.clone(),
        display_name,
        price: round2(price),
        absolute_change: round2(quote.change.unwrap_or(0.0)),
        percent_change: round2(quote.percent_change.unwrap_or(0.0)),
        volume: volume.next_volume(),
        volume_synthetic: volume.is_synthetic(),
        market_cap_label: format_market_cap(profile.market_cap_billions),
    })
}

/// Fetch quote and profile for one symbol together and merge them.
async fn fetch_symbol(
    provider: &dyn QuoteProvider,
    entry: &SymbolEntry,
    volume: &dyn VolumeSource,
) -> Option<QuoteRecord> {
    let (quote, profile) =
        tokio::join!(provider.quote(&entry.ticker), provider.profile(&entry.ticker));
    merge_record(entry, quote, profile, volume)
}

/// Run one full acquisition cycle over `registry`.
///
/// Records come back in registry order. Fails with [`QbError::NoData`] if no
/// symbol produced a record; never returns an empty `Ok`.
pub async fn acquire(
    provider: Arc<dyn QuoteProvider>,
    registry: &SymbolRegistry,
    volume: Arc<dyn VolumeSource>,
    options: &AcquireOptions,
) -> Result<Vec<QuoteRecord>, QbError> {
    let start = tokio::time::Instant::now();
    info!(
        "[acquire] cycle start: provider={}, symbols={}, stagger={:?}",
        provider.name(),
        registry.len(),
        options.stagger,
    );

    let tasks: Vec<_> = registry
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let provider = Arc::clone(&provider);
            let volume = Arc::clone(&volume);
            let entry = entry.clone();
            let not_before = start + options.stagger * idx as u32;
            tokio::spawn(async move {
                tokio::time::sleep_until(not_before).await;
                fetch_symbol(provider.as_ref(), &entry, volume.as_ref()).await
            })
        })
        .collect();

    let mut records = Vec::with_capacity(tasks.len());
    for (entry, joined) in registry.iter().zip(join_all(tasks).await) {
        match joined {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => warn!("[acquire] {}: task aborted, dropping: {e}", entry.ticker),
        }
    }

    info!(
        "[acquire] cycle done: {}/{} symbol(s) in {:?}",
        records.len(),
        registry.len(),
        start.elapsed(),
    );

    if records.is_empty() {
        return Err(QbError::NoData);
    }
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::volume::FixedVolume;

    /// In-memory provider. Unlisted tickers fail both calls.
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        pub quotes: HashMap<String, ProviderQuote>,
        pub profiles: HashMap<String, ProviderProfile>,
        pub panic_on: Option<String>,
        /// `(ticker, ms since first call)` for each quote request.
        pub calls: Mutex<Vec<(String, u128)>>,
        pub origin: Mutex<Option<tokio::time::Instant>>,
    }

    impl FakeProvider {
        pub fn with_quote(mut self, ticker: &str, price: f64, change: f64, pct: f64) -> Self {
            self.quotes.insert(
                ticker.into(),
                ProviderQuote {
                    price: Some(price),
                    change: Some(change),
                    percent_change: Some(pct),
                    error: None,
                },
            );
            self
        }

        pub fn with_profile(mut self, ticker: &str, name: &str, mcap: f64) -> Self {
            self.profiles.insert(
                ticker.into(),
                ProviderProfile { name: Some(name.into()), market_cap_billions: Some(mcap) },
            );
            self
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn quote(&self, ticker: &str) -> Result<ProviderQuote> {
            if self.panic_on.as_deref() == Some(ticker) {
                panic!("fake provider exploded on {ticker}");
            }
            let now = tokio::time::Instant::now();
            let origin = *self.origin.lock().unwrap().get_or_insert(now);
            self.calls.lock().unwrap().push((ticker.to_string(), (now - origin).as_millis()));
            self.quotes.get(ticker).cloned().ok_or_else(|| anyhow!("no quote for {ticker}"))
        }

        async fn profile(&self, ticker: &str) -> Result<ProviderProfile> {
            self.profiles.get(ticker).cloned().ok_or_else(|| anyhow!("no profile for {ticker}"))
        }
    }

    pub(crate) fn registry(tickers: &[(&str, &str)]) -> SymbolRegistry {
        SymbolRegistry::new(tickers.iter().map(|(t, n)| SymbolEntry::new(*t, *n)).collect()).unwrap()
    }

    fn entry() -> SymbolEntry {
        SymbolEntry::new("AAPL", "Apple Inc.")
    }

    fn good_quote() -> ProviderQuote {
        ProviderQuote { price: Some(189.8449), change: Some(-1.266), percent_change: Some(-0.6646), error: None }
    }

    #[test]
    fn merge_normalizes_values() {
        let profile = ProviderProfile { name: Some("Apple Inc".into()), market_cap_billions: Some(2500.0) };
        let rec = merge_record(&entry(), Ok(good_quote()), Ok(profile), &FixedVolume(7)).unwrap();
        assert_eq!(rec.ticker, "AAPL");
        assert_eq!(rec.display_name, "Apple Inc");
        assert_eq!(rec.price, 189.84);
        assert_eq!(rec.absolute_change, -1.27);
        assert_eq!(rec.percent_change, -0.66);
        assert_eq!(rec.volume, 7);
        assert!(rec.volume_synthetic);
        assert_eq!(rec.market_cap_label, "2.5T");
    }

    #[test]
    fn profile_failure_falls_back() {
        let rec =
            merge_record(&entry(), Ok(good_quote()), Err(anyhow!("timeout")), &FixedVolume(1)).unwrap();
        assert_eq!(rec.display_name, "Apple Inc.");
        assert_eq!(rec.market_cap_label, "N/A");
    }

    #[test]
    fn empty_profile_falls_back() {
        let rec = merge_record(&entry(), Ok(good_quote()), Ok(ProviderProfile::default()), &FixedVolume(1))
            .unwrap();
        assert_eq!(rec.display_name, "Apple Inc.");
        assert_eq!(rec.market_cap_label, "N/A");
    }

    #[test]
    fn ticker_used_when_no_name_anywhere() {
        let entry = SymbolEntry::new("ZZZ", "");
        let rec = merge_record(&entry, Ok(good_quote()), Ok(ProviderProfile::default()), &FixedVolume(1))
            .unwrap();
        assert_eq!(rec.display_name, "ZZZ");
    }

    #[test]
    fn bad_quotes_are_dropped() {
        let v = FixedVolume(1);
        assert!(merge_record(&entry(), Err(anyhow!("down")), Ok(ProviderProfile::default()), &v).is_none());

        let errored = ProviderQuote { error: Some("API limit reached".into()), ..good_quote() };
        assert!(merge_record(&entry(), Ok(errored), Ok(ProviderProfile::default()), &v).is_none());

        let zero = ProviderQuote { price: Some(0.0), ..Default::default() };
        assert!(merge_record(&entry(), Ok(zero), Ok(ProviderProfile::default()), &v).is_none());

        let missing = ProviderQuote::default();
        assert!(merge_record(&entry(), Ok(missing), Ok(ProviderProfile::default()), &v).is_none());
    }

    #[test]
    fn missing_change_defaults_to_zero() {
        let q = ProviderQuote { price: Some(10.0), ..Default::default() };
        let rec = merge_record(&entry(), Ok(q), Ok(ProviderProfile::default()), &FixedVolume(1)).unwrap();
        assert_eq!(rec.absolute_change, 0.0);
        assert_eq!(rec.percent_change, 0.0);
    }

    #[tokio::test]
    async fn partial_failure_keeps_registry_order() {
        let provider = FakeProvider::default()
            .with_quote("AAPL", 150.0, 1.0, 0.5)
            .with_quote("MSFT", 300.2, -2.0, -0.7)
            .with_profile("MSFT", "Microsoft Corp", 3100.0);
        let reg = registry(&[("AAPL", "Apple Inc."), ("GOOGL", "Alphabet Inc."), ("MSFT", "Microsoft")]);
        let opts = AcquireOptions { stagger: Duration::ZERO };

        let records = acquire(Arc::new(provider), &reg, Arc::new(FixedVolume(5)), &opts).await.unwrap();
        let tickers: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);

        // AAPL quote ok, profile failed: fallback name + N/A.
        assert_eq!(records[0].display_name, "Apple Inc.");
        assert_eq!(records[0].market_cap_label, "N/A");
        assert_eq!(records[1].display_name, "Microsoft Corp");
        assert_eq!(records[1].market_cap_label, "3.1T");
    }

    #[tokio::test]
    async fn total_failure_is_no_data() {
        let reg = registry(&[("AAPL", "Apple Inc."), ("GOOGL", "Alphabet Inc.")]);
        let opts = AcquireOptions { stagger: Duration::ZERO };
        let err = acquire(Arc::new(FakeProvider::default()), &reg, Arc::new(FixedVolume(1)), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, QbError::NoData));
    }

    #[tokio::test]
    async fn panicking_symbol_is_dropped() {
        let provider = FakeProvider {
            panic_on: Some("GOOGL".into()),
            ..FakeProvider::default().with_quote("AAPL", 1.0, 0.0, 0.0)
        };
        let reg = registry(&[("AAPL", "Apple Inc."), ("GOOGL", "Alphabet Inc.")]);
        let opts = AcquireOptions { stagger: Duration::ZERO };
        let records = acquire(Arc::new(provider), &reg, Arc::new(FixedVolume(1)), &opts).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ticker, "AAPL");
    }

    #[tokio::test(start_paused = true)]
    async fn requests_are_staggered_by_index() {
        let provider = Arc::new(
            FakeProvider::default()
                .with_quote("A", 1.0, 0.0, 0.0)
                .with_quote("B", 1.0, 0.0, 0.0)
                .with_quote("C", 1.0, 0.0, 0.0),
        );
        let reg = registry(&[("A", ""), ("B", ""), ("C", "")]);
        let start = tokio::time::Instant::now();
        *provider.origin.lock().unwrap() = Some(start);

        let dyn_provider: Arc<dyn QuoteProvider> = provider.clone();
        acquire(dyn_provider, &reg, Arc::new(FixedVolume(1)), &AcquireOptions::default()).await.unwrap();

        let mut calls = provider.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![("A".to_string(), 0), ("B".to_string(), 200), ("C".to_string(), 400)]
        );
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }
}
