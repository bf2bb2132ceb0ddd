//! # ibridge-app - Settings and Commands
//!
//! Glue between the front end and the launch engine: loads settings,
//! resolves the active file and reports the outcome through a [`Notifier`].
//!
//! ## Public API
//!
//! - [`Settings`], [`load_settings()`], [`init_config()`], [`config_path()`] - `config.toml` handling
//! - [`JumpRequest`], [`JumpContext`], [`run_jump()`] - The jump command
//! - [`Notifier`], [`StderrNotifier`] - User-visible messages

pub mod config;
pub mod jump;
pub mod notify;

pub use config::{
    config_path, default_config_path, init_config, load_settings, IdeSettings, LaunchSettings,
    ProjectSettings, Settings, CONFIG_ENV_VAR,
};
pub use jump::{run_jump, split_file_line, JumpContext, JumpRequest};
pub use notify::{Notifier, StderrNotifier};
