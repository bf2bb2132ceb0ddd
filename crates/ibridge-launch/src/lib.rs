//! # ibridge-launch - IDE Discovery and Launch Strategies
//!
//! Finds the local IntelliJ IDEA install, detects whether a project is
//! already open and drives the IDE to a file and line through an ordered
//! list of launch strategies.
//!
//! Depends on [`ibridge_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Orchestration
//! - [`Launcher`] - Runs the project-open step and direct-file strategies
//! - [`LaunchReport`] - Outcome of one jump, serializable for `--json`
//!
//! ### Platform Data
//! - [`PlatformProfile`] - Install locations, URI launcher and strategy order per OS
//! - [`ProfileOverrides`] - User adjustments applied to a profile
//!
//! ### Discovery
//! - [`locate_installation()`] - Known paths, registry, Toolbox, then `PATH`
//! - [`is_project_open()`] - Window-title heuristic
//! - [`deep_link()`] - `ideaapp://open?...` URL builder
//!
//! ### Ports
//! - [`CommandRunner`], [`UriOpener`], [`KeystrokeSimulator`], [`PathProbe`],
//!   [`WindowQuery`] - Capability traits
//! - [`SystemPorts`] - Real adapters for the running OS

pub mod deep_link;
pub mod detector;
pub mod executable;
pub mod orchestrator;
pub mod ports;
pub mod profile;
pub mod scripts;
pub mod system;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Public API re-exports
pub use deep_link::{deep_link, encode_component};
pub use detector::{is_project_open, titles_mention_project};
pub use executable::{locate_installation, ExecutableSource, Installation, ResolvedExecutable};
pub use orchestrator::{LaunchReport, Launcher};
pub use ports::{
    CommandOutput, CommandRunner, CommandSpec, KeystrokeSimulator, PathProbe, Ports, UriOpener,
    WindowQuery,
};
pub use profile::{PlatformProfile, ProfileOverrides, UriLauncher, DEFAULT_URL_SCHEME};
pub use system::{
    AppleScriptKeystrokes, NoKeystrokes, SystemPorts, SystemProbe, SystemRunner,
    SystemUriOpener, SystemWindowQuery,
};
