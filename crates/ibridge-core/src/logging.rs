//! Logging configuration using tracing
//!
//! Events go to a daily file under the platform data directory; the
//! terminal stays reserved for command output and notifications.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "IBRIDGE_LOG";

const LOG_FILE_PREFIX: &str = "ibridge";
const LOG_FILE_SUFFIX: &str = "log";

/// Daily files kept before the oldest is removed
const MAX_LOG_FILES: usize = 7;

/// Targets logged at `info` when `IBRIDGE_LOG` is unset. Everything else
/// only reports warnings.
const LOG_TARGETS: &[&str] = &["ibridge_core", "ibridge_launch", "ibridge_app", "idea_bridge"];

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/idea-bridge/logs/` (platform data dir).
/// Log level is controlled by the `IBRIDGE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// IBRIDGE_LOG=debug ibridge open src/Main.java:12
/// IBRIDGE_LOG=ibridge_launch=trace ibridge root src/Main.java
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender(&log_dir)?)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::debug!("idea-bridge logging to {}", log_dir.display());

    Ok(())
}

fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| Error::config(format!("cannot log to {}: {}", log_dir.display(), e)))
}

fn default_filter() -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}=info", target))
        .chain(std::iter::once("warn".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Name of the daily file for `date`, matching the appender's rotation.
fn log_file_name(date: NaiveDate) -> String {
    format!(
        "{}.{}.{}",
        LOG_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        LOG_FILE_SUFFIX
    )
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("idea-bridge").join("logs")
}

/// Get the log file path for the current day
///
/// The appender rotates on UTC dates.
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join(log_file_name(chrono::Utc::now().date_naive()))
}
