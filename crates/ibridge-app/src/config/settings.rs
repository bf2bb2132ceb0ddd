//! Settings file location, loading and initialization

use super::types::Settings;
use ibridge_core::prelude::*;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative settings file
pub const CONFIG_ENV_VAR: &str = "IBRIDGE_CONFIG";

const CONFIG_DIR: &str = "idea-bridge";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# idea-bridge configuration
#
# Every setting is optional; remove the leading '#' to change a default.

[ide]
# url_scheme = "ideaapp"          # Custom URL scheme registered by the IDE
# window_marker = "IntelliJ"      # Substring of IDE window titles
# process_marker = "idea"         # Substring of the IDE process name (Windows)
# bare_command = "intellij-idea"  # Command used when no install is found (default: per platform)
# extra_executables = ["/opt/idea-ce/bin/idea.sh"]
# extra_app_bundles = ["/Applications/IntelliJ IDEA EAP.app"]

[project]
# extra_high_markers = [".hg"]
# extra_normal_markers = ["WORKSPACE"]
# max_depth = 15                  # Directories inspected when looking for the root (at most 15)

[launch]
# detect_open_project = true      # Skip re-opening projects already shown by the IDE
# keystroke_automation = true     # Allow simulated keystrokes (macOS)
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────────────────

/// Platform default: `<config dir>/idea-bridge/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Settings file to use: `explicit`, then `IBRIDGE_CONFIG`, then the
/// platform default.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => default_config_path(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `config_path`, falling back to defaults when the file
/// is missing or invalid.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write the commented default settings file. Never overwrites.
pub fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Err(Error::config(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG).context("Failed to write default config")?;

    info!("Created default config at {:?}", config_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibridge_launch::PlatformProfile;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[ide]
url_scheme = "idea"

[project]
max_depth = 8
"#,
        )
        .unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.ide.url_scheme.as_deref(), Some("idea"));
        assert_eq!(settings.project.max_depth, 8);
        assert!(settings.launch.detect_open_project);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_init_config_writes_loadable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/idea-bridge/config.toml");

        init_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Settings = toml::from_str(&content).expect("Default config should be valid TOML");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_default_config_keeps_platform_bare_commands() {
        let settings: Settings = toml::from_str(DEFAULT_CONFIG).unwrap();
        let overrides = settings.profile_overrides();

        let windows = PlatformProfile::windows().with_overrides(&overrides);
        let linux = PlatformProfile::linux(None).with_overrides(&overrides);
        assert_eq!(windows.bare_command, "idea64.exe");
        assert_eq!(linux.bare_command, "intellij-idea");
        assert!(DEFAULT_CONFIG.contains("(default: per platform)"));
    }

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[launch]\ndetect_open_project = false\n").unwrap();

        let err = init_config(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("detect_open_project = false"));
    }

    #[test]
    #[serial]
    fn test_config_path_precedence() {
        std::env::set_var(CONFIG_ENV_VAR, "/etc/ibridge.toml");
        assert_eq!(
            config_path(Some(Path::new("/explicit.toml"))),
            Some(PathBuf::from("/explicit.toml"))
        );
        assert_eq!(config_path(None), Some(PathBuf::from("/etc/ibridge.toml")));
        std::env::remove_var(CONFIG_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_config_path_defaults_without_env() {
        std::env::set_var(CONFIG_ENV_VAR, "");
        assert_eq!(config_path(None), default_config_path());
        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(config_path(None), default_config_path());
    }
}
