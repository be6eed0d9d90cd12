//! Interactive dashboard event loop.
//!
//! The [`Dashboard`] is owned here and written only from this loop, which
//! multiplexes three sources with `tokio::select!`:
//!
//! - stdin lines → [`Command`]s
//! - [`CycleReport`]s from background acquisition cycles
//! - Ctrl+C
//!
//! A failed write to stdout (closed pipe) ends the loop with an error.

use std::future::Future;
use std::io::Write;

use anyhow::{Context, Result, anyhow};
use qb_core::AcquisitionStatus;
use qb_core::state::Dashboard;
use qb_md::refresh::{CycleReport, CycleReportReceiver, Refresher};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP_TEXT};
use crate::render::{RenderOptions, render};

const PROMPT: &str = "> ";

pub struct App {
    dashboard: Dashboard,
    refresher: Refresher,
    reports: CycleReportReceiver,
    render: RenderOptions,
}

impl App {
    pub fn new(
        dashboard: Dashboard,
        refresher: Refresher,
        reports: CycleReportReceiver,
        render: RenderOptions,
    ) -> Self {
        Self { dashboard, refresher, reports, render }
    }

    /// Supersede any in-flight cycle and start a new one.
    fn start_cycle(&mut self) {
        let id = self.dashboard.begin_cycle();
        // Detached: the report comes back over the channel.
        drop(self.refresher.trigger(id));
    }

    /// Apply a cycle report. Returns `true` if it changed the dashboard.
    fn apply(&mut self, report: CycleReport) -> bool {
        let CycleReport { cycle, outcome, finished_at_ms } = report;
        let applied = self.dashboard.finish_cycle(cycle, outcome, finished_at_ms);
        if applied {
            info!("[runner] cycle {cycle} applied ({} record(s))", self.dashboard.record_count());
        }
        applied
    }

    fn draw(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "\n{}{PROMPT}", render(&self.dashboard, self.render))
            .and_then(|()| out.flush())
            .context("failed to write to stdout")
    }

    fn say(&self, out: &mut impl Write, text: &str) -> Result<()> {
        write!(out, "{text}\n{PROMPT}").and_then(|()| out.flush()).context("failed to write to stdout")
    }

    /// Handle one prompt line. Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                self.say(out, &e.to_string())?;
                return Ok(true);
            }
        };
        debug!("[runner] command {command:?}");

        match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                self.say(out, HELP_TEXT)?;
                return Ok(true);
            }
            Command::Search(query) => self.dashboard.set_query(query),
            Command::Sort(field) => self.dashboard.toggle_sort(field),
            Command::Refresh => self.start_cycle(),
            Command::Redraw => {}
        }
        self.draw(out)?;
        Ok(true)
    }

    /// Run on stdin/stdout until `quit`, end of input or Ctrl+C.
    pub async fn run(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.drive(stdin, std::io::stdout(), tokio::signal::ctrl_c()).await
    }

    /// Event loop over an input stream, an output sink and a shutdown signal.
    ///
    /// `shutdown` is created once and polled across iterations, so a signal
    /// raised while a command is being handled still ends the loop.
    async fn drive<R, W, S>(mut self, input: R, mut out: W, shutdown: S) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        S: Future,
    {
        self.start_cycle();
        self.draw(&mut out)?;

        let mut lines = input.lines();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if !self.handle_line(&line, &mut out)? {
                            break;
                        }
                    }
                    None => {
                        info!("[runner] stdin closed");
                        break;
                    }
                },
                Some(report) = self.reports.recv() => {
                    if self.apply(report) {
                        self.draw(&mut out)?;
                    }
                }
                _ = &mut shutdown => {
                    info!("[runner] shutdown signal received");
                    break;
                }
            }
        }

        writeln!(out).context("failed to write to stdout")?;
        Ok(())
    }

    /// Fetch once, print the resulting screen and return.
    ///
    /// Fails if the cycle ended in the error status.
    pub async fn run_once(self) -> Result<()> {
        self.fetch_once(std::io::stdout()).await
    }

    async fn fetch_once(mut self, mut out: impl Write) -> Result<()> {
        self.start_cycle();

        while self.dashboard.status().is_loading() {
            match self.reports.recv().await {
                Some(report) => {
                    self.apply(report);
                }
                None => return Err(anyhow!("acquisition channel closed before a result arrived")),
            }
        }

        write!(out, "{}", render(&self.dashboard, self.render))
            .and_then(|()| out.flush())
            .context("failed to write to stdout")?;
        match self.dashboard.status() {
            AcquisitionStatus::Error(message) => {
                warn!("[runner] one-shot fetch failed");
                Err(anyhow!("{message}"))
            }
            _ => Ok(()),
        }
    }
}
