//! File logging.
//!
//! The TUI owns the terminal, so diagnostics go to a daily-rolling file
//! under the logs directory instead of stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Env var that overrides the configured log filter.
pub const LOG_ENV: &str = "EVENTLY_LOG";

const LOG_FILE_PREFIX: &str = "evently.log";

/// Builds the filter: `EVENTLY_LOG` when set and valid, else `fallback`.
pub fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `<logs_dir>/evently.log.<date>`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// life of the process. Installing twice is not an error; the first
/// subscriber wins.
///
/// # Errors
/// Returns an error if the logs directory cannot be created.
pub fn init(filter: &str, logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_ansi(false)
        .with_writer(writer)
        .try_init();

    tracing::debug!(dir = %logs_dir.display(), "logging initialized");
    Ok(guard)
}
