//! Per-platform launch profiles
//!
//! A [`PlatformProfile`] is pure data: where the IDE is usually installed,
//! how the OS opens URIs, which window markers identify the IDE and in what
//! order the direct-file strategies run. The orchestrator consumes it without
//! any platform branching of its own.

use ibridge_core::{Platform, Strategy};
use std::path::{Path, PathBuf};

use crate::ports::CommandSpec;

/// Custom URL scheme registered by the IDE
pub const DEFAULT_URL_SCHEME: &str = "ideaapp";

/// Substring identifying IDE windows and processes
pub const DEFAULT_WINDOW_MARKER: &str = "IntelliJ";

/// Substring of the IDE executable's process name (Windows)
pub const DEFAULT_PROCESS_MARKER: &str = "idea";

/// App Paths entry written by the Windows installer
const WINDOWS_APP_PATHS_KEY: &str =
    r"HKLM:\SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths\idea64.exe";

// ─────────────────────────────────────────────────────────────────────────────
// Supporting Types
// ─────────────────────────────────────────────────────────────────────────────

/// How the OS hands a URI to its registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriLauncher {
    /// macOS `open <uri>`
    Open,
    /// Windows `rundll32 url.dll,FileProtocolHandler <uri>`
    ///
    /// Used instead of `cmd /C start` because cmd re-parses `&` in the query.
    RunDll,
    /// freedesktop `xdg-open <uri>`
    XdgOpen,
}

impl UriLauncher {
    pub fn command(&self, uri: &str) -> CommandSpec {
        match self {
            UriLauncher::Open => CommandSpec::new("open").arg(uri),
            UriLauncher::RunDll => {
                CommandSpec::new("rundll32").args(["url.dll,FileProtocolHandler", uri])
            }
            UriLauncher::XdgOpen => CommandSpec::new("xdg-open").arg(uri),
        }
    }
}

/// A `<channel_dir>/*/<script>` wildcard for JetBrains Toolbox installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxPattern {
    pub channel_dir: PathBuf,
    pub script: PathBuf,
}

impl ToolboxPattern {
    pub fn new(channel_dir: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            channel_dir: channel_dir.into(),
            script: script.into(),
        }
    }
}

/// User-supplied adjustments applied on top of a built-in profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub url_scheme: Option<String>,
    pub window_marker: Option<String>,
    pub process_marker: Option<String>,
    pub bare_command: Option<String>,
    /// Probed before the built-in candidates
    pub extra_executables: Vec<PathBuf>,
    /// Probed before the built-in bundles
    pub extra_app_bundles: Vec<PathBuf>,
    pub keystroke_automation: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Platform Profile
// ─────────────────────────────────────────────────────────────────────────────

/// Static description of how to find and drive the IDE on one OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// CLI launchers in priority order
    pub executable_candidates: Vec<PathBuf>,
    /// Application bundles for "open with application" (macOS)
    pub app_bundles: Vec<PathBuf>,
    /// Program that opens a path with a given bundle: `<open_with> -a <app> <path>`
    pub open_with: Option<String>,
    /// Name handed to the OS when nothing is installed at a known location
    pub bare_command: String,
    /// Registry key whose default value is the install path (Windows)
    pub registry_key: Option<String>,
    /// Toolbox install directories scanned after the known paths (Linux)
    pub toolbox_patterns: Vec<ToolboxPattern>,
    pub url_scheme: String,
    pub uri_launcher: UriLauncher,
    /// Whether GUI keystroke automation can drive the IDE
    pub keystroke_automation: bool,
    /// Process name used by keystroke scripts (`tell process "idea"`)
    pub keystroke_process: String,
    pub window_marker: String,
    pub process_marker: String,
    /// Direct-file strategies in the order they are tried
    pub file_strategies: Vec<Strategy>,
}

impl PlatformProfile {
    /// Profile for the running OS.
    pub fn current() -> Self {
        Self::for_platform(Platform::current(), dirs::home_dir().as_deref())
    }

    pub fn for_platform(platform: Platform, home: Option<&Path>) -> Self {
        match platform {
            Platform::MacOs => Self::macos(),
            Platform::Windows => Self::windows(),
            Platform::Linux => Self::linux(home),
        }
    }

    pub fn macos() -> Self {
        Self {
            platform: Platform::MacOs,
            executable_candidates: paths(&[
                "/Applications/IntelliJ IDEA.app/Contents/MacOS/idea",
                "/Applications/IntelliJ IDEA CE.app/Contents/MacOS/idea",
                "/Applications/IntelliJ IDEA Ultimate.app/Contents/MacOS/idea",
                "/usr/local/bin/idea",
            ]),
            app_bundles: paths(&[
                "/Applications/IntelliJ IDEA.app",
                "/Applications/IntelliJ IDEA CE.app",
                "/Applications/IntelliJ IDEA Ultimate.app",
            ]),
            open_with: Some("open".to_string()),
            bare_command: "idea".to_string(),
            registry_key: None,
            toolbox_patterns: Vec::new(),
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
            uri_launcher: UriLauncher::Open,
            keystroke_automation: true,
            keystroke_process: "idea".to_string(),
            window_marker: DEFAULT_WINDOW_MARKER.to_string(),
            process_marker: DEFAULT_PROCESS_MARKER.to_string(),
            file_strategies: vec![Strategy::CliFile, Strategy::DeepLink, Strategy::OpenWithApp],
        }
    }

    pub fn windows() -> Self {
        Self {
            platform: Platform::Windows,
            executable_candidates: paths(&[
                r"C:\Program Files\JetBrains\IntelliJ IDEA\bin\idea64.exe",
                r"C:\Program Files\JetBrains\IntelliJ IDEA Community Edition\bin\idea64.exe",
                r"C:\Program Files (x86)\JetBrains\IntelliJ IDEA\bin\idea64.exe",
                r"C:\Program Files (x86)\JetBrains\IntelliJ IDEA Community Edition\bin\idea64.exe",
            ]),
            app_bundles: Vec::new(),
            open_with: None,
            bare_command: "idea64.exe".to_string(),
            registry_key: Some(WINDOWS_APP_PATHS_KEY.to_string()),
            toolbox_patterns: Vec::new(),
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
            uri_launcher: UriLauncher::RunDll,
            keystroke_automation: false,
            keystroke_process: "idea64".to_string(),
            window_marker: DEFAULT_WINDOW_MARKER.to_string(),
            process_marker: DEFAULT_PROCESS_MARKER.to_string(),
            file_strategies: vec![Strategy::CliFile, Strategy::DeepLink],
        }
    }

    pub fn linux(home: Option<&Path>) -> Self {
        let mut executable_candidates = paths(&[
            "/opt/idea/bin/idea.sh",
            "/usr/local/bin/idea",
            "/usr/bin/idea",
            "/snap/intellij-idea-community/current/bin/idea.sh",
            "/snap/intellij-idea-ultimate/current/bin/idea.sh",
        ]);
        let mut toolbox_patterns = Vec::new();

        if let Some(home) = home {
            let toolbox = home.join(".local/share/JetBrains/Toolbox");
            // Toolbox 2.x shell scripts and app layout
            executable_candidates.push(toolbox.join("scripts/idea"));
            executable_candidates.push(toolbox.join("apps/intellij-idea-ultimate/bin/idea.sh"));
            executable_candidates.push(toolbox.join("apps/intellij-idea/bin/idea.sh"));
            // Toolbox 1.x versioned channel layout
            for edition in ["IDEA-U", "IDEA-C"] {
                toolbox_patterns.push(ToolboxPattern::new(
                    toolbox.join("apps").join(edition).join("ch-0"),
                    "bin/idea.sh",
                ));
            }
        }

        Self {
            platform: Platform::Linux,
            executable_candidates,
            app_bundles: Vec::new(),
            open_with: None,
            bare_command: "intellij-idea".to_string(),
            registry_key: None,
            toolbox_patterns,
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
            uri_launcher: UriLauncher::XdgOpen,
            keystroke_automation: false,
            keystroke_process: "idea".to_string(),
            window_marker: DEFAULT_WINDOW_MARKER.to_string(),
            process_marker: DEFAULT_PROCESS_MARKER.to_string(),
            file_strategies: vec![Strategy::CliFile, Strategy::DeepLink],
        }
    }

    /// Apply user overrides. Empty strings are ignored.
    pub fn with_overrides(mut self, overrides: &ProfileOverrides) -> Self {
        set_if_present(&mut self.url_scheme, &overrides.url_scheme);
        set_if_present(&mut self.window_marker, &overrides.window_marker);
        set_if_present(&mut self.process_marker, &overrides.process_marker);
        set_if_present(&mut self.bare_command, &overrides.bare_command);

        prepend(&mut self.executable_candidates, &overrides.extra_executables);
        prepend(&mut self.app_bundles, &overrides.extra_app_bundles);

        // Automation can only be switched off; platforms without it stay without
        if overrides.keystroke_automation == Some(false) {
            self.keystroke_automation = false;
        }
        self
    }

    /// `<open_with> -a <app> <path>`, when the platform supports it.
    pub fn open_with_command(&self, app: &Path, path: &Path) -> Option<CommandSpec> {
        self.open_with.as_ref().map(|program| {
            CommandSpec::new(program)
                .arg("-a")
                .arg(app)
                .arg(path)
        })
    }
}

fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
}

fn set_if_present(field: &mut String, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        *field = value.to_string();
    }
}

fn prepend(list: &mut Vec<PathBuf>, extra: &[PathBuf]) {
    let mut merged: Vec<PathBuf> = extra.to_vec();
    merged.extend(list.drain(..).filter(|p| !extra.contains(p)));
    *list = merged;
}
