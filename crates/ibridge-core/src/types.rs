//! Domain types shared by the locator, detector and launcher

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// File Target
// ─────────────────────────────────────────────────────────────────────────────

/// A file and 1-based line to open in the IDE.
///
/// Constructed once per invocation and never mutated. Lines below 1 are
/// clamped to 1 since the IDE rejects `--line 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTarget {
    path: PathBuf,
    line: u32,
}

impl FileTarget {
    /// Smallest line number accepted by the IDE.
    pub const MIN_LINE: u32 = 1;

    /// Create a target from an already absolute path and a 1-based line.
    pub fn new(path: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            path: path.into(),
            line: line.max(Self::MIN_LINE),
        }
    }

    /// Create a target from a 0-based editor cursor line.
    pub fn from_zero_based(path: impl Into<PathBuf>, line: u32) -> Self {
        Self::new(path, line.saturating_add(1))
    }

    /// Resolve `path` to an absolute, existing file.
    ///
    /// Symlinks are kept as written so the project name matches what the IDE
    /// shows for the checkout. `dunce` strips the `\\?\` prefix on Windows,
    /// which the IDE launcher scripts do not understand.
    pub fn resolve(path: &Path, line: u32) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let absolute = std::path::absolute(path).map_err(|_| Error::file_not_found(path))?;
        let normalized = normalize_lexically(&absolute);
        Ok(Self::new(dunce::simplified(&normalized), line))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Drop `.` and `..` components without consulting the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

impl fmt::Display for FileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Project Root
// ─────────────────────────────────────────────────────────────────────────────

/// Strength of the evidence that a directory is a project boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTier {
    /// Version-control metadata or IDE project configuration
    High,
    /// Build descriptors (manifests, build scripts)
    Normal,
}

/// A directory believed to be the top of the enclosing project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRoot {
    pub path: PathBuf,
    pub tier: MarkerTier,
    /// Marker file or directory name that matched
    pub marker: String,
}

impl ProjectRoot {
    pub fn new(path: impl Into<PathBuf>, tier: MarkerTier, marker: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tier,
            marker: marker.into(),
        }
    }

    /// Base name of the root directory, as shown in IDE window titles.
    ///
    /// Falls back to the full path for roots without a final component
    /// (e.g. `/`).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Platform
// ─────────────────────────────────────────────────────────────────────────────

/// Operating system family the launcher targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    /// Platform of the running binary. BSDs and other Unixes use the Linux
    /// profile since they share `xdg-open` and X11 window managers.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Launch Bookkeeping
// ─────────────────────────────────────────────────────────────────────────────

/// A way of getting the IDE to show a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Open the project root, then jump to the file
    ProjectOpen,
    /// `<exe> --line <n> <file>`
    CliFile,
    /// `ideaapp://open?file=...&line=...`
    DeepLink,
    /// OS "open with application", plus a go-to-line keystroke script
    OpenWithApp,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ProjectOpen => write!(f, "project-open"),
            Strategy::CliFile => write!(f, "cli"),
            Strategy::DeepLink => write!(f, "deep-link"),
            Strategy::OpenWithApp => write!(f, "open-with-app"),
        }
    }
}

/// Progress of a single launch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchPhase {
    #[default]
    NotStarted,
    ProjectLaunchAttempted,
    FileJumpAttempted,
    Done,
}

/// Outcome of one strategy. Only used to decide fallthrough and to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchAttempt {
    pub strategy: Strategy,
    pub platform: Platform,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LaunchAttempt {
    pub fn succeeded(strategy: Strategy, platform: Platform) -> Self {
        Self {
            strategy,
            platform,
            succeeded: true,
            detail: None,
        }
    }

    pub fn failed(strategy: Strategy, platform: Platform, reason: impl Into<String>) -> Self {
        Self {
            strategy,
            platform,
            succeeded: false,
            detail: Some(reason.into()),
        }
    }
}
