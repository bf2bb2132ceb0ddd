//! Configuration file parsing for idea-bridge
//!
//! Supports a single `config.toml` in the platform config directory, or the
//! file named by `--config` / `IBRIDGE_CONFIG`.

pub mod settings;
pub mod types;

pub use settings::{config_path, default_config_path, init_config, load_settings, CONFIG_ENV_VAR};
pub use types::*;
