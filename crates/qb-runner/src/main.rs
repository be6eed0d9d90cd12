//! # qb-runner
//!
//! Main entry point for the quoteboard terminal dashboard.
//!
//! Loads an optional JSON configuration file, builds the symbol registry and
//! quote provider, then either runs the interactive dashboard or fetches once
//! and prints the table.
//!
//! # Usage
//!
//! ```bash
//! FINNHUB_API_KEY=... quoteboard config.json --sort percent --desc
//! FINNHUB_API_KEY=... quoteboard --once --query tech --no-color
//! ```

mod app;
mod command;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use qb_core::config::{AppConfig, load_config};
use qb_core::state::Dashboard;
use qb_core::view::ViewState;
use qb_core::{SortDirection, SortField};
use qb_md::acquisition::AcquireOptions;
use qb_md::refresh::Refresher;
use qb_md::volume::SyntheticVolume;
use tracing::info;

use crate::app::App;
use crate::render::RenderOptions;

/// Stock Market Dashboard.
#[derive(Parser)]
#[command(name = "quoteboard", about = "Stock Market Dashboard")]
struct Cli {
    /// Configuration file path (JSON).
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Fetch once, print the table and exit (non-zero on error).
    #[arg(long)]
    once: bool,

    /// Initial search query.
    #[arg(short, long)]
    query: Option<String>,

    /// Initial sort column (symbol, price, change, percent, volume).
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort in descending order.
    #[arg(long)]
    desc: bool,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn initial_view(&self) -> Result<ViewState> {
        let sort_field = match &self.sort {
            Some(s) => s.parse::<SortField>()?,
            None => SortField::default(),
        };
        let sort_direction = if self.desc { SortDirection::Descending } else { SortDirection::Ascending };
        Ok(ViewState { query: self.query.clone().unwrap_or_default(), sort_field, sort_direction })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    // 2. Initialize logging
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    let _log_guard = qb_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());

    info!(
        "quoteboard starting: config={}, log_level={}",
        cli.config.as_ref().map_or_else(|| "<none>".to_string(), |p| p.display().to_string()),
        cli.log_level,
    );

    // 3. Registry, provider and refresher
    let registry = config.registry()?;
    let provider = qb_md::registry::create_provider(&config.provider)?;
    info!("[runner] provider '{}' ready, {} symbol(s)", provider.name(), registry.len());

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let refresher = Refresher::new(
        provider,
        Arc::new(registry),
        Arc::new(SyntheticVolume),
        AcquireOptions { stagger: config.acquisition.effective_stagger() },
        tx,
    );

    // 4. Run
    if cli.no_color {
        colored::control::set_override(false);
    }
    let dashboard = Dashboard::with_view(cli.initial_view()?);
    let app = App::new(dashboard, refresher, rx, RenderOptions { color: !cli.no_color });

    if cli.once { app.run_once().await } else { app.run().await }
}
