//! Logging for the `yzqtv` binary
//!
//! The console is filtered to the level picked on the command line. The run
//! log in `logs/yzqtv-last-run.log` always records every event, so a request
//! answered with the generic 500 body can be matched to the storage error
//! behind it.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the run log, replaced on every start.
pub const LAST_RUN_LOG: &str = "yzqtv-last-run.log";

/// Installs the console and run-log subscribers.
///
/// `RUST_LOG` overrides the console filter. `logs_dir` defaults to `./logs`.
/// Returns the path of the run log.
///
/// # Errors
///
/// - `std::io::Error` - Logs directory or run log could not be created, or a
///   global subscriber is already installed
pub fn init_tracing(
    console_level: Level,
    logs_dir: Option<&Path>,
) -> Result<PathBuf, std::io::Error> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));
    create_dir_all(logs_path)?;

    let run_log_path = logs_path.join(LAST_RUN_LOG);
    let run_log = File::create(&run_log_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directives(console_level)));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_filter(console_filter);

    let run_log_layer = fmt::layer()
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(run_log)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(run_log_layer)
        .try_init()
        .map_err(std::io::Error::other)?;

    tracing::info!(
        "Logging to console at {console_level}, full run log at {}",
        run_log_path.display()
    );

    Ok(run_log_path)
}

/// Console filter for `level`. Per-request spans only show up from debug on.
fn console_directives(level: Level) -> String {
    if level >= Level::DEBUG {
        level.to_string()
    } else {
        format!("{level},tower_http=warn")
    }
}

/// Console verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only failures
    Error,
    /// Failures and ignored configuration
    Warn,
    /// Startup and backend selection
    Info,
    /// Every request and history change
    Debug,
    /// Everything
    Trace,
}

impl CliLogLevel {
    /// Tracing level for this setting.
    ///
    /// # Examples
    /// ```
    /// use yzqtv_core::tracing_setup::CliLogLevel;
    ///
    /// assert_eq!(CliLogLevel::Debug.as_tracing_level(), tracing::Level::DEBUG);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CliLogLevel::Error => "error",
            CliLogLevel::Warn => "warn",
            CliLogLevel::Info => "info",
            CliLogLevel::Debug => "debug",
            CliLogLevel::Trace => "trace",
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_levels_map_to_tracing() {
        assert_eq!(CliLogLevel::Error.as_tracing_level(), Level::ERROR);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
        assert_eq!(CliLogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_request_spans_hidden_below_debug() {
        assert_eq!(console_directives(Level::INFO), "INFO,tower_http=warn");
        assert_eq!(console_directives(Level::ERROR), "ERROR,tower_http=warn");
        assert_eq!(console_directives(Level::DEBUG), "DEBUG");
        assert_eq!(console_directives(Level::TRACE), "TRACE");
    }

    #[test]
    fn test_init_creates_run_log_once() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");

        let run_log = init_tracing(Level::WARN, Some(&logs_dir)).unwrap();
        assert_eq!(run_log, logs_dir.join(LAST_RUN_LOG));
        assert!(run_log.exists());

        assert!(init_tracing(Level::WARN, Some(&logs_dir)).is_err());
    }
}
