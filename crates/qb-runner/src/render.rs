//! Terminal rendering of the dashboard.
//!
//! Three screens, chosen by the acquisition status:
//!
//! | Status    | Screen                                          |
//! |-----------|-------------------------------------------------|
//! | `Loading` | "Loading Stock Data" banner                     |
//! | `Error`   | "Error Loading Data", message, retry hint       |
//! | `Ready`   | title, last-updated clock, table, footer        |
//!
//! Every function returns a `String`; the caller owns stdout.

use colored::Colorize;
use qb_core::format::{MARKET_CAP_UNAVAILABLE, format_percent, format_price, format_signed, format_volume};
use qb_core::state::Dashboard;
use qb_core::time_util::format_clock;
use qb_core::view::ViewState;
use qb_core::{AcquisitionStatus, QuoteRecord, SortField};

pub const EMPTY_STATE: &str = "No stocks found matching your search.";

/// Rendering switches.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit ANSI colors.
    pub color: bool,
}

impl RenderOptions {
    fn bold(&self, s: &str) -> String {
        if self.color { s.bold().to_string() } else { s.to_string() }
    }

    fn dim(&self, s: &str) -> String {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }

    fn trend(&self, s: &str, gain: bool) -> String {
        match (self.color, gain) {
            (false, _) => s.to_string(),
            (true, true) => s.green().to_string(),
            (true, false) => s.red().to_string(),
        }
    }

    fn alert(&self, s: &str) -> String {
        if self.color { s.red().bold().to_string() } else { s.to_string() }
    }
}

/// Render the screen matching the dashboard's current status.
pub fn render(dashboard: &Dashboard, opts: RenderOptions) -> String {
    match dashboard.status() {
        AcquisitionStatus::Loading => render_loading(opts),
        AcquisitionStatus::Error(message) => render_error(message, opts),
        AcquisitionStatus::Ready { fetched_at_ms, .. } => {
            render_table(&dashboard.visible(), dashboard.record_count(), dashboard.view(), *fetched_at_ms, opts)
        }
    }
}

pub fn render_loading(opts: RenderOptions) -> String {
    format!("{}\n{}\n", opts.bold("Loading Stock Data"), opts.dim("Fetching the latest market information..."))
}

pub fn render_error(message: &str, opts: RenderOptions) -> String {
    format!(
        "{}\n{}\n{}\n",
        opts.alert("Error Loading Data"),
        message,
        opts.dim("Type `retry` to try again."),
    )
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: String,
    align: Align,
}

/// Header label, with the direction arrow on the active sort column.
fn sortable_header(field: SortField, view: &ViewState) -> String {
    if field == view.sort_field {
        format!("{} {}", field.label(), view.sort_direction.arrow())
    } else {
        field.label().to_string()
    }
}

fn columns(view: &ViewState) -> [Column; 7] {
    let col = |header: String, align| Column { header, align };
    [
        col(sortable_header(SortField::Ticker, view), Align::Left),
        col("Company".to_string(), Align::Left),
        col(sortable_header(SortField::Price, view), Align::Right),
        col(sortable_header(SortField::AbsoluteChange, view), Align::Right),
        col(sortable_header(SortField::PercentChange, view), Align::Right),
        col(sortable_header(SortField::Volume, view), Align::Right),
        col("Market Cap".to_string(), Align::Right),
    ]
}

/// Plain-text cells of one row. Change cells carry the ▲/▼ marker.
fn row_cells(r: &QuoteRecord) -> [String; 7] {
    let marker = if r.is_gain() { '▲' } else { '▼' };
    let market_cap = if r.market_cap_label == MARKET_CAP_UNAVAILABLE {
        r.market_cap_label.clone()
    } else {
        format!("${}", r.market_cap_label)
    };
    [
        r.ticker.clone(),
        r.display_name.clone(),
        format!("${}", format_price(r.price)),
        format!("{marker} {}", format_signed(r.absolute_change)),
        format_percent(r.percent_change),
        format_volume(r.volume),
        market_cap,
    ]
}

fn pad(s: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{s:<width$}"),
        Align::Right => format!("{s:>width$}"),
    }
}

/// Render the ready screen for the already-derived `rows`.
///
/// `total` is the record count before filtering.
pub fn render_table(
    rows: &[&QuoteRecord],
    total: usize,
    view: &ViewState,
    fetched_at_ms: u64,
    opts: RenderOptions,
) -> String {
    let cols = columns(view);
    let cells: Vec<[String; 7]> = rows.iter().map(|r| row_cells(r)).collect();

    let mut widths = [0usize; 7];
    for (i, c) in cols.iter().enumerate() {
        widths[i] = c.header.chars().count();
    }
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&opts.bold("Stock Market Dashboard"));
    out.push('\n');
    out.push_str(&opts.dim(&format!("Last updated {}", format_clock(fetched_at_ms))));
    out.push('\n');

    let shown = if view.query.is_empty() {
        format!("{total} stocks")
    } else {
        format!("{} of {total} stocks matching \"{}\"", rows.len(), view.query)
    };
    out.push_str(&opts.dim(&shown));
    out.push_str("\n\n");

    let header: Vec<String> =
        cols.iter().zip(widths).map(|(c, w)| pad(&c.header, w, c.align)).collect();
    out.push_str(&opts.bold(&header.join("  ")));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if rows.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
    }

    for (record, row) in rows.iter().zip(&cells) {
        let line: Vec<String> = row
            .iter()
            .zip(cols.iter().zip(widths))
            .enumerate()
            .map(|(i, (cell, (col, w)))| {
                let padded = pad(cell, w, col.align);
                match i {
                    3 | 4 => opts.trend(&padded, record.is_gain()),
                    0 => opts.bold(&padded),
                    _ => padded,
                }
            })
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&opts.dim(&footer(rows)));
    out.push('\n');
    out
}

fn footer(rows: &[&QuoteRecord]) -> String {
    let mut text = String::from("Data provided by Finnhub.");
    if rows.iter().any(|r| r.volume_synthetic) {
        text.push_str(" Volume figures are synthetic demo values, not market data.");
    }
    text
}
