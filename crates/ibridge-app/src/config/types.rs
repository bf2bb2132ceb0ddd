//! Configuration types for idea-bridge
//!
//! Defines `Settings` (config.toml) and its sections. Every field has a
//! default so partial files load cleanly.

use ibridge_core::{RootLocator, DEFAULT_MAX_DEPTH};
use ibridge_launch::{PlatformProfile, ProfileOverrides};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ide: IdeSettings,

    #[serde(default)]
    pub project: ProjectSettings,

    #[serde(default)]
    pub launch: LaunchSettings,
}

impl Settings {
    /// Profile adjustments taken from `[ide]` and `[launch]`.
    pub fn profile_overrides(&self) -> ProfileOverrides {
        ProfileOverrides {
            url_scheme: self.ide.url_scheme.clone(),
            window_marker: self.ide.window_marker.clone(),
            process_marker: self.ide.process_marker.clone(),
            bare_command: self.ide.bare_command.clone(),
            extra_executables: self.ide.extra_executables.clone(),
            extra_app_bundles: self.ide.extra_app_bundles.clone(),
            keystroke_automation: Some(self.launch.keystroke_automation),
        }
    }

    /// Platform profile for the running OS with these settings applied.
    pub fn platform_profile(&self) -> PlatformProfile {
        PlatformProfile::current().with_overrides(&self.profile_overrides())
    }

    /// Root locator with the `[project]` marker additions.
    pub fn root_locator(&self) -> RootLocator {
        RootLocator::default()
            .with_high_markers(self.project.extra_high_markers.iter().cloned())
            .with_normal_markers(self.project.extra_normal_markers.iter().cloned())
            .with_max_depth(self.project.max_depth)
    }
}

/// IDE identification and install locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdeSettings {
    /// Custom URL scheme (default: "ideaapp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_scheme: Option<String>,

    /// Substring of IDE window titles and process names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_marker: Option<String>,

    /// Substring of the IDE process name (Windows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_marker: Option<String>,

    /// Command handed to the OS when no install is found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bare_command: Option<String>,

    /// Launchers probed before the built-in locations
    #[serde(default)]
    pub extra_executables: Vec<PathBuf>,

    /// Application bundles probed before the built-in ones (macOS)
    #[serde(default)]
    pub extra_app_bundles: Vec<PathBuf>,
}

/// Project root detection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectSettings {
    /// Checked together with `.git` / `.idea`
    #[serde(default)]
    pub extra_high_markers: Vec<String>,

    /// Checked together with the build descriptors
    #[serde(default)]
    pub extra_normal_markers: Vec<String>,

    /// Directories inspected, starting with the file's own
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            extra_high_markers: Vec::new(),
            extra_normal_markers: Vec::new(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Launch behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchSettings {
    /// Look for the project among open IDE windows before opening it
    #[serde(default = "default_true")]
    pub detect_open_project: bool,

    /// Allow simulated keystrokes (macOS)
    #[serde(default = "default_true")]
    pub keystroke_automation: bool,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            detect_open_project: true,
            keystroke_automation: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.project.max_depth, 15);
        assert!(settings.launch.detect_open_project);
        assert!(settings.launch.keystroke_automation);
        assert!(settings.ide.url_scheme.is_none());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[project]
extra_normal_markers = ["WORKSPACE"]

[launch]
detect_open_project = false
"#,
        )
        .unwrap();

        assert_eq!(settings.project.extra_normal_markers, vec!["WORKSPACE"]);
        assert_eq!(settings.project.max_depth, 15);
        assert!(!settings.launch.detect_open_project);
        assert!(settings.launch.keystroke_automation);
    }

    #[test]
    fn test_profile_overrides_mapping() {
        let settings = Settings {
            ide: IdeSettings {
                url_scheme: Some("idea".to_string()),
                extra_executables: vec![PathBuf::from("/opt/idea-ce/bin/idea.sh")],
                ..Default::default()
            },
            launch: LaunchSettings {
                keystroke_automation: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let overrides = settings.profile_overrides();
        assert_eq!(overrides.url_scheme.as_deref(), Some("idea"));
        assert_eq!(overrides.keystroke_automation, Some(false));
        assert_eq!(
            overrides.extra_executables,
            vec![PathBuf::from("/opt/idea-ce/bin/idea.sh")]
        );
    }

    #[test]
    fn test_root_locator_applies_project_settings() {
        let settings = Settings {
            project: ProjectSettings {
                max_depth: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(settings.root_locator().max_depth(), 3);

        // The walk never passes the configured depth
        let mut probed = Vec::new();
        settings
            .root_locator()
            .find_with(Path::new("/a/b/c/d/e/f.txt"), |p| {
                probed.push(p.parent().map(Path::to_path_buf));
                false
            });
        probed.dedup();
        assert_eq!(probed.len(), 3);
    }

    #[test]
    fn test_configured_max_depth_cannot_exceed_default() {
        let settings: Settings = toml::from_str("[project]\nmax_depth = 40\n").unwrap();
        assert_eq!(settings.project.max_depth, 40);
        assert_eq!(settings.root_locator().max_depth(), 15);
    }
}
