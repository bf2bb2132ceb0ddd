//! Launch orchestration
//!
//! One generic state machine drives every platform:
//!
//! 1. When the project root is known and not already open, open the project
//!    and then jump to the file inside it.
//! 2. Otherwise, or when that fails, try the profile's direct-file strategies
//!    in order until one succeeds.
//!
//! Each strategy failure is logged and recorded; only running out of
//! strategies is an error.

use ibridge_core::prelude::*;
use ibridge_core::{FileTarget, LaunchAttempt, LaunchPhase, Platform, ProjectRoot, Strategy};
use serde::Serialize;
use std::path::Path;

use crate::deep_link::deep_link;
use crate::detector::is_project_open;
use crate::executable::{locate_installation, ExecutableSource, Installation, ResolvedExecutable};
use crate::ports::{CommandSpec, Ports};
use crate::profile::PlatformProfile;

/// What happened during one jump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchReport {
    pub target: FileTarget,
    pub platform: Platform,
    pub project_root: Option<ProjectRoot>,
    /// Whether the IDE was already showing the project
    pub project_was_open: bool,
    pub executable: ResolvedExecutable,
    /// Whether a real install was found rather than the bare command name
    pub ide_installed: bool,
    /// Strategy that succeeded
    pub strategy: Option<Strategy>,
    pub phase: LaunchPhase,
    pub attempts: Vec<LaunchAttempt>,
}

impl LaunchReport {
    fn new(
        target: &FileTarget,
        platform: Platform,
        root: Option<&ProjectRoot>,
        executable: ResolvedExecutable,
    ) -> Self {
        Self {
            target: target.clone(),
            platform,
            project_root: root.cloned(),
            project_was_open: false,
            ide_installed: executable.is_installed(),
            executable,
            strategy: None,
            phase: LaunchPhase::NotStarted,
            attempts: Vec::new(),
        }
    }

    fn record(&mut self, strategy: Strategy, outcome: &Result<()>) {
        let attempt = match outcome {
            Ok(()) => LaunchAttempt::succeeded(strategy, self.platform),
            Err(e) => {
                if e.is_recoverable() {
                    warn!("{}", e);
                } else {
                    error!("{}", e);
                }
                LaunchAttempt::failed(strategy, self.platform, e.to_string())
            }
        };
        self.attempts.push(attempt);
        if outcome.is_ok() {
            self.strategy = Some(strategy);
            self.phase = LaunchPhase::Done;
        }
    }

    /// Pretty-printed JSON for `--json` output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Drives the IDE for one profile and set of ports.
pub struct Launcher<'a> {
    profile: &'a PlatformProfile,
    ports: Ports<'a>,
    detect_open_projects: bool,
}

impl<'a> Launcher<'a> {
    pub fn new(profile: &'a PlatformProfile, ports: Ports<'a>) -> Self {
        Self {
            profile,
            ports,
            detect_open_projects: true,
        }
    }

    /// Treat every project as not open, always taking the project-open path.
    pub fn without_open_detection(mut self) -> Self {
        self.detect_open_projects = false;
        self
    }

    pub fn profile(&self) -> &PlatformProfile {
        self.profile
    }

    /// Whether the IDE currently shows `root`.
    pub fn is_project_open(&self, root: &ProjectRoot) -> bool {
        self.detect_open_projects && is_project_open(root, self.ports.windows)
    }

    /// Show `target` in the IDE, opening `root` first when it is not open.
    #[instrument(skip_all, fields(file = %target))]
    pub fn open(&self, target: &FileTarget, root: Option<&ProjectRoot>) -> Result<LaunchReport> {
        let install = locate_installation(self.profile, self.ports.probe, self.ports.runner);
        let mut report = LaunchReport::new(
            target,
            self.profile.platform,
            root,
            install.executable.clone(),
        );
        if !report.ide_installed {
            warn!(
                "No IntelliJ IDEA install found; relying on {} being on PATH",
                install.executable.program.display()
            );
        }

        if let Some(root) = root {
            if self.is_project_open(root) {
                info!("Project {} is already open", root.name());
                report.project_was_open = true;
            } else {
                report.phase = LaunchPhase::ProjectLaunchAttempted;
                let outcome = self.open_project(target, root, &install);
                report.record(Strategy::ProjectOpen, &outcome);
                if outcome.is_ok() {
                    return Ok(report);
                }
            }
        }

        report.phase = LaunchPhase::FileJumpAttempted;
        for &strategy in &self.profile.file_strategies {
            let outcome = self.open_file(strategy, target, root, &install);
            report.record(strategy, &outcome);
            if outcome.is_ok() {
                info!("Opened {} via {}", target, strategy);
                return Ok(report);
            }
        }

        Err(Error::exhausted(target.path(), report.attempts.len()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project-open step
    // ─────────────────────────────────────────────────────────────────────────

    fn open_project(
        &self,
        target: &FileTarget,
        root: &ProjectRoot,
        install: &Installation,
    ) -> Result<()> {
        let fail = |reason: String| Error::strategy_failed(Strategy::ProjectOpen, reason);

        // Only reach for the bundle when no real launcher exists
        let bundle = match install.executable.source {
            ExecutableSource::Bare => install.app_bundle.as_deref(),
            _ => None,
        };
        let bundle_command = bundle.and_then(|app| {
            self.profile
                .open_with_command(app, &root.path)
                .map(|command| (app, command))
        });

        let via_bundle = match bundle_command {
            Some((app, command)) => {
                debug!("Opening project {} with {}", root.path.display(), app.display());
                self.ports
                    .runner
                    .run(&command)
                    .and_then(|output| output.check(&command))
                    .map_err(|e| fail(e.to_string()))?;
                Some(app)
            }
            None => {
                let command = CommandSpec::new(&install.executable.program).arg(&root.path);
                self.ports
                    .runner
                    .spawn_detached(&command)
                    .map_err(|e| fail(e.to_string()))?;
                None
            }
        };

        match via_bundle {
            Some(app) if self.profile.keystroke_automation => self
                .ports
                .keys
                .open_file_at_line(app, target.path(), target.line())
                .map_err(|e| fail(format!("keystroke automation: {}", e))),
            _ => self.jump_into_project(target, root, install),
        }
    }

    /// Deep link scoped to the project, falling back to the CLI line form.
    fn jump_into_project(
        &self,
        target: &FileTarget,
        root: &ProjectRoot,
        install: &Installation,
    ) -> Result<()> {
        let uri = deep_link(&self.profile.url_scheme, target, Some(&root.path));
        match self.ports.uri.open_uri(&uri) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Deep link into project failed ({}); using CLI", e);
                self.ports
                    .runner
                    .spawn_detached(&cli_file_command(&install.executable, target))
                    .map_err(|e| Error::strategy_failed(Strategy::ProjectOpen, e.to_string()))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Direct-file strategies
    // ─────────────────────────────────────────────────────────────────────────

    fn open_file(
        &self,
        strategy: Strategy,
        target: &FileTarget,
        root: Option<&ProjectRoot>,
        install: &Installation,
    ) -> Result<()> {
        let fail = |reason: String| Error::strategy_failed(strategy, reason);

        match strategy {
            Strategy::CliFile => self
                .ports
                .runner
                .spawn_detached(&cli_file_command(&install.executable, target))
                .map_err(|e| fail(e.to_string())),
            Strategy::DeepLink => {
                let project = root.map(|r| r.path.as_path());
                let uri = deep_link(&self.profile.url_scheme, target, project);
                self.ports
                    .uri
                    .open_uri(&uri)
                    .map_err(|e| fail(e.to_string()))
            }
            Strategy::OpenWithApp => {
                let app = install
                    .app_bundle
                    .as_deref()
                    .ok_or_else(|| fail("no application bundle installed".to_string()))?;
                self.open_with_app(app, target).map_err(fail)
            }
            Strategy::ProjectOpen => Err(fail("not a direct-file strategy".to_string())),
        }
    }

    fn open_with_app(&self, app: &Path, target: &FileTarget) -> std::result::Result<(), String> {
        let command = self
            .profile
            .open_with_command(app, target.path())
            .ok_or_else(|| format!("{} cannot open files with an application", self.profile.platform))?;
        self.ports
            .runner
            .run(&command)
            .and_then(|output| output.check(&command))
            .map_err(|e| e.to_string())?;

        if self.profile.keystroke_automation {
            // Best effort: the file is already showing
            if let Err(e) = self.ports.keys.go_to_line(app, target.line()) {
                warn!("Could not move to line {}: {}", target.line(), e);
            }
        }
        Ok(())
    }
}

/// `<exe> --line <n> <file>`
fn cli_file_command(executable: &ResolvedExecutable, target: &FileTarget) -> CommandSpec {
    CommandSpec::new(&executable.program)
        .arg("--line")
        .arg(target.line().to_string())
        .arg(target.path())
}
