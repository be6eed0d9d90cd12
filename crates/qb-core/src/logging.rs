//! Logging initialization using the `tracing` ecosystem.
//!
//! | Sink    | Writer                                   | When                 |
//! |---------|------------------------------------------|----------------------|
//! | console | stderr, ANSI, compact                    | always               |
//! | file    | `{log_dir}/{module_name}.YYYY-MM-DD`, non-blocking | `log_dir` given |
//!
//! Stdout is reserved for the dashboard itself. `RUST_LOG` overrides the
//! level passed in.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at program start. When file logging is enabled the returned
/// guard must be held until exit, or buffered lines are lost.
///
/// - `log_level`: default filter if `RUST_LOG` is unset (e.g. `"warn"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `module_name`: log file prefix (e.g. `"quoteboard"`)
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer().compact().with_writer(std::io::stderr).with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, module_name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false).with_thread_ids(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(env_filter).with(console_layer).with(file_layer).init();

    guard
}
