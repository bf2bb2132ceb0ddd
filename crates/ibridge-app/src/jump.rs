//! The jump command: show the active file at the cursor line in the IDE
//!
//! Resolves the file, finds its project root and hands both to the
//! [`Launcher`]. Failures end here as a single error notification; nothing
//! propagates to the caller.

use ibridge_core::prelude::*;
use ibridge_core::{FileTarget, ProjectRoot};
use ibridge_launch::{LaunchReport, Launcher, PlatformProfile, Ports};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::Settings;
use crate::notify::Notifier;

/// `path:LINE`, where the path itself may contain colons (`C:\src\A.java:3`)
static FILE_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+):(\d+)$").expect("file:line regex is valid"));

/// What the editor asked to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpRequest {
    /// Active file; `None` when the editor has no file focused
    pub file: Option<PathBuf>,
    /// 1-based cursor line
    pub line: u32,
}

impl JumpRequest {
    /// Build a request from a `FILE[:LINE]` argument.
    ///
    /// An explicit `line` wins over a `:LINE` suffix. With `zero_based` the
    /// line is an editor cursor index and gets shifted by one.
    pub fn from_arg(arg: Option<&str>, line: Option<u32>, zero_based: bool) -> Self {
        let (file, suffix_line) = match arg.map(str::trim).filter(|a| !a.is_empty()) {
            Some(arg) => {
                let (path, suffix) = split_file_line(arg);
                (Some(path), suffix)
            }
            None => (None, None),
        };

        let raw = line.or(suffix_line).unwrap_or(if zero_based { 0 } else { 1 });
        let line = if zero_based {
            raw.saturating_add(1)
        } else {
            raw.max(FileTarget::MIN_LINE)
        };

        Self { file, line }
    }
}

/// Split a trailing `:LINE` off `arg`.
pub fn split_file_line(arg: &str) -> (PathBuf, Option<u32>) {
    if let Some(caps) = FILE_LINE_PATTERN.captures(arg) {
        if let Ok(line) = caps[2].parse::<u32>() {
            return (PathBuf::from(&caps[1]), Some(line));
        }
    }
    (PathBuf::from(arg), None)
}

/// Settings, profile and ports for one invocation.
pub struct JumpContext<'a> {
    pub settings: &'a Settings,
    pub profile: &'a PlatformProfile,
    pub ports: Ports<'a>,
    pub notifier: &'a dyn Notifier,
}

impl<'a> JumpContext<'a> {
    fn launcher(&self) -> Launcher<'a> {
        let launcher = Launcher::new(self.profile, self.ports);
        if self.settings.launch.detect_open_project {
            launcher
        } else {
            launcher.without_open_detection()
        }
    }

    /// Project root for `file`, warning when there is none.
    pub fn project_root(&self, file: &Path) -> Option<ProjectRoot> {
        let root = self.settings.root_locator().find(file);
        if root.is_none() {
            self.notifier
                .warn(&Error::project_root_not_found(file).to_string());
        }
        root
    }

    /// Whether the IDE shows the project enclosing `dir`.
    pub fn project_status(&self, dir: &Path) -> Option<(ProjectRoot, bool)> {
        let root = self.settings.root_locator().find_for_dir(dir)?;
        let open = self.launcher().is_project_open(&root);
        Some((root, open))
    }
}

/// Run the jump command. Returns the report on success; every failure has
/// already been notified when `None` comes back.
pub fn run_jump(request: &JumpRequest, ctx: &JumpContext<'_>) -> Option<LaunchReport> {
    match jump(request, ctx) {
        Ok(report) => {
            let via = report
                .strategy
                .map(|s| s.to_string())
                .unwrap_or_default();
            ctx.notifier.info(&format!(
                "Opened {} in IntelliJ IDEA ({})",
                report.target, via
            ));
            Some(report)
        }
        Err(e) => {
            ctx.notifier.error(&e.to_string());
            None
        }
    }
}

fn jump(request: &JumpRequest, ctx: &JumpContext<'_>) -> Result<LaunchReport> {
    let file = request.file.as_deref().ok_or(Error::NoActiveFile)?;
    let target = FileTarget::resolve(file, request.line)?;
    let root = ctx.project_root(target.path());

    debug!(
        "Jumping to {} (root: {:?})",
        target,
        root.as_ref().map(|r| &r.path)
    );
    ctx.launcher().open(&target, root.as_ref())
}
