//! # ibridge-core - Core Domain Types
//!
//! Foundation crate for idea-bridge. Provides domain types, error handling,
//! logging setup and project root discovery.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`FileTarget`] - File path plus 1-based line to open
//! - [`ProjectRoot`], [`MarkerTier`] - Detected project boundary
//! - [`Platform`], [`Strategy`], [`LaunchAttempt`], [`LaunchPhase`] - Launch bookkeeping
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Project Discovery (`discovery`)
//! - [`find_project_root()`] - Walk ancestors looking for project markers
//! - [`RootLocator`] - Configurable marker lists and depth bound
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use ibridge_core::prelude::*;
//! ```

pub mod discovery;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all idea-bridge crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use discovery::{
    find_project_root, RootLocator, DEFAULT_MAX_DEPTH, HIGH_PRIORITY_MARKERS,
    NORMAL_PRIORITY_MARKERS,
};
pub use error::{Error, Result, ResultExt};
pub use types::{
    FileTarget, LaunchAttempt, LaunchPhase, MarkerTier, Platform, ProjectRoot, Strategy,
};
