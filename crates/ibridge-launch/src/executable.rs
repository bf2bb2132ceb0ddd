//! IDE installation discovery
//!
//! Probes the profile's well-known paths first, then the platform-specific
//! fallbacks (Windows registry, JetBrains Toolbox directories), then `PATH`.
//! When nothing is found the bare command name is returned so the OS still
//! gets a chance to resolve it at spawn time.

use ibridge_core::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::ports::{CommandRunner, CommandSpec, PathProbe};
use crate::profile::{PlatformProfile, ToolboxPattern};
use crate::scripts::registry_default_value_command;

/// Where the launcher executable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutableSource {
    KnownPath,
    Registry,
    Toolbox,
    SearchPath,
    /// Not found anywhere; left to the OS
    Bare,
}

/// The IDE launcher to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedExecutable {
    pub program: PathBuf,
    pub source: ExecutableSource,
}

impl ResolvedExecutable {
    pub fn new(program: impl Into<PathBuf>, source: ExecutableSource) -> Self {
        Self {
            program: program.into(),
            source,
        }
    }

    /// Whether an actual install was located (anything but the bare name).
    pub fn is_installed(&self) -> bool {
        self.source != ExecutableSource::Bare
    }
}

/// Everything discovered about the local IDE install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    pub executable: ResolvedExecutable,
    /// Application bundle for "open with application" (macOS)
    pub app_bundle: Option<PathBuf>,
}

/// Locate the IDE launcher and application bundle for `profile`.
pub fn locate_installation(
    profile: &PlatformProfile,
    probe: &dyn PathProbe,
    runner: &dyn CommandRunner,
) -> Installation {
    let executable = locate_executable(profile, probe, runner);
    let app_bundle = profile
        .app_bundles
        .iter()
        .find(|bundle| probe.exists(bundle))
        .cloned();

    debug!(
        "IDE executable: {:?} ({:?}), app bundle: {:?}",
        executable.program, executable.source, app_bundle
    );

    Installation {
        executable,
        app_bundle,
    }
}

fn locate_executable(
    profile: &PlatformProfile,
    probe: &dyn PathProbe,
    runner: &dyn CommandRunner,
) -> ResolvedExecutable {
    if let Some(path) = profile
        .executable_candidates
        .iter()
        .find(|candidate| probe.exists(candidate))
    {
        return ResolvedExecutable::new(path, ExecutableSource::KnownPath);
    }

    if let Some(key) = &profile.registry_key {
        if let Some(path) = query_registry(key, runner) {
            return ResolvedExecutable::new(path, ExecutableSource::Registry);
        }
    }

    for pattern in &profile.toolbox_patterns {
        if let Some(path) = scan_toolbox(pattern, probe) {
            return ResolvedExecutable::new(path, ExecutableSource::Toolbox);
        }
    }

    if let Some(path) = probe.find_in_path(&profile.bare_command) {
        return ResolvedExecutable::new(path, ExecutableSource::SearchPath);
    }

    debug!(
        "No IDE install found, falling back to bare command {:?}",
        profile.bare_command
    );
    ResolvedExecutable::new(&profile.bare_command, ExecutableSource::Bare)
}

/// Read an install path from the registry's default value for `key`.
fn query_registry(key: &str, runner: &dyn CommandRunner) -> Option<PathBuf> {
    let script = registry_default_value_command(key);
    let command = CommandSpec::new("powershell").args([
        "-NoProfile",
        "-NonInteractive",
        "-Command",
        script.as_str(),
    ]);

    match runner.run(&command).and_then(|output| output.check(&command)) {
        Ok(output) => {
            let value = output.stdout.trim();
            if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value.trim_matches('"')))
            }
        }
        Err(e) => {
            debug!("Registry lookup for {} failed: {}", key, e);
            None
        }
    }
}

/// Expand `<channel_dir>/*/<script>`, preferring the newest build.
fn scan_toolbox(pattern: &ToolboxPattern, probe: &dyn PathProbe) -> Option<PathBuf> {
    let mut builds = probe.list_dir(&pattern.channel_dir);
    builds.sort_by_key(|b| std::cmp::Reverse(build_number(b)));

    builds
        .into_iter()
        .map(|build| build.join(&pattern.script))
        .find(|script| probe.exists(script))
}

/// Numeric components of a Toolbox build directory (`241.14494.240`).
fn build_number(dir: &Path) -> Vec<u64> {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .split(['.', '-'])
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}
