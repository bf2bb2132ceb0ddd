//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Strategy;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Invocation Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No active file to open")]
    NoActiveFile,

    #[error("File does not exist: {path}")]
    FileNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Project Errors (non-fatal)
    // ─────────────────────────────────────────────────────────────
    #[error("Could not find the project root for {path}; opening the file directly")]
    ProjectRootNotFound { path: PathBuf },

    #[error("Could not detect open IDE projects: {message}")]
    OpenDetectionFailed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Launch Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Launch strategy {strategy} failed: {reason}")]
    LaunchStrategyFailed { strategy: Strategy, reason: String },

    #[error("Failed to launch IntelliJ IDEA for {path} ({attempts} strategies tried)")]
    AllStrategiesExhausted { path: PathBuf, attempts: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn project_root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ProjectRootNotFound { path: path.into() }
    }

    pub fn open_detection(message: impl Into<String>) -> Self {
        Self::OpenDetectionFailed {
            message: message.into(),
        }
    }

    pub fn strategy_failed(strategy: Strategy, reason: impl Into<String>) -> Self {
        Self::LaunchStrategyFailed {
            strategy,
            reason: reason.into(),
        }
    }

    pub fn exhausted(path: impl Into<PathBuf>, attempts: usize) -> Self {
        Self::AllStrategiesExhausted {
            path: path.into(),
            attempts,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error only degrades the launch instead of stopping it
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ProjectRootNotFound { .. }
                | Error::OpenDetectionFailed { .. }
                | Error::LaunchStrategyFailed { .. }
        )
    }

    /// Check if this error must be surfaced to the user as a failure
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NoActiveFile | Error::FileNotFound { .. } | Error::AllStrategiesExhausted { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
