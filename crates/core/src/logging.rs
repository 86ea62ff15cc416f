//! Logging infrastructure for the kbbot assistant.
//!
//! This module initializes the tracing subscriber for structured logging.
//! Console logs are emitted to stderr to keep stdout clean for answers; an
//! optional log file receives the same events as JSON lines.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber.
///
/// This sets up structured logging with:
/// - Human-readable output to stderr (stdout is reserved for answers)
/// - Environment-based filtering (RUST_LOG or provided level)
/// - Optional ANSI color control
/// - Optional JSON log file, appended to across runs
///
/// # Arguments
/// * `log_level` - Optional log level override (e.g., "debug", "info")
/// * `no_color` - Disable colored output
/// * `log_file` - Optional path of a log file to append to
///
/// # Example
/// ```no_run
/// use kbbot_core::logging::init_logging;
///
/// init_logging(None, false, None).expect("Failed to initialize logging");
/// ```
pub fn init_logging(
    log_level: Option<&str>,
    no_color: bool,
    log_file: Option<&Path>,
) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::Config(format!("Failed to open log file {:?}: {}", path, e))
                })?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Check if the terminal supports color output.
fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_creates_file_and_installs_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_path = dir.path().join("kbbot.log");

        // Only this test installs a subscriber; the others fail before it
        init_logging(Some("info"), true, Some(&log_path)).unwrap();
        assert!(log_path.is_file());

        let second = init_logging(Some("info"), true, None);
        assert!(matches!(second, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let result = init_logging(Some("kbbot=notalevel"), true, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_unwritable_log_file_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = init_logging(Some("info"), true, Some(dir.path()));
        assert!(result.is_err());
    }
}
