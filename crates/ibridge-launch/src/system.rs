//! Real adapters for the capability ports
//!
//! Thin wrappers over `std::process::Command` and the filesystem. Every
//! external program gets its arguments as a vector, never through a shell.

use ibridge_core::prelude::*;
use ibridge_core::Platform;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::ports::{
    CommandOutput, CommandRunner, CommandSpec, KeystrokeSimulator, PathProbe, Ports, UriOpener,
    WindowQuery,
};
use crate::profile::{PlatformProfile, UriLauncher};
use crate::scripts::{
    go_to_line_script, open_file_at_line_script, window_titles_script, windows_titles_command,
};

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

// ─────────────────────────────────────────────────────────────────────────────
// Command Runner
// ─────────────────────────────────────────────────────────────────────────────

/// Runs programs with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        command
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        trace!("Running {}", spec);
        let output = Self::command(spec).stdin(Stdio::null()).output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> io::Result<()> {
        debug!("Spawning detached {}", spec);
        let mut command = Self::command(spec);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        // The handle is dropped right away; the IDE keeps running on its own
        command.spawn().map(drop)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Probe
// ─────────────────────────────────────────────────────────────────────────────

/// Filesystem and `PATH` lookups against the real machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl PathProbe for SystemProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn find_in_path(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// URI Opener
// ─────────────────────────────────────────────────────────────────────────────

/// Opens URIs with the platform's handler program.
pub struct SystemUriOpener<'a> {
    runner: &'a dyn CommandRunner,
    launcher: UriLauncher,
}

impl<'a> SystemUriOpener<'a> {
    pub fn new(runner: &'a dyn CommandRunner, launcher: UriLauncher) -> Self {
        Self { runner, launcher }
    }
}

impl UriOpener for SystemUriOpener<'_> {
    fn open_uri(&self, uri: &str) -> io::Result<()> {
        let command = self.launcher.command(uri);
        self.runner.run(&command)?.check(&command).map(drop)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keystrokes
// ─────────────────────────────────────────────────────────────────────────────

/// Drives the IDE with `osascript` and System Events (macOS).
pub struct AppleScriptKeystrokes<'a> {
    runner: &'a dyn CommandRunner,
    process: String,
}

impl<'a> AppleScriptKeystrokes<'a> {
    pub fn new(runner: &'a dyn CommandRunner, process: impl Into<String>) -> Self {
        Self {
            runner,
            process: process.into(),
        }
    }

    fn run_script(&self, script: String) -> io::Result<()> {
        // Detached: the script sleeps while the IDE comes to the front
        self.runner
            .spawn_detached(&CommandSpec::new("osascript").arg("-e").arg(script))
    }
}

impl KeystrokeSimulator for AppleScriptKeystrokes<'_> {
    fn open_file_at_line(&self, app: &Path, file: &Path, line: u32) -> io::Result<()> {
        self.run_script(open_file_at_line_script(app, &self.process, file, line))
    }

    fn go_to_line(&self, app: &Path, line: u32) -> io::Result<()> {
        self.run_script(go_to_line_script(app, line))
    }
}

/// For platforms without keyboard automation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeystrokes;

impl KeystrokeSimulator for NoKeystrokes {
    fn open_file_at_line(&self, _app: &Path, _file: &Path, _line: u32) -> io::Result<()> {
        Err(unsupported())
    }

    fn go_to_line(&self, _app: &Path, _line: u32) -> io::Result<()> {
        Err(unsupported())
    }
}

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "keystroke automation is not available on this platform",
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Query
// ─────────────────────────────────────────────────────────────────────────────

/// Lists IDE window titles with the platform's native tooling.
pub struct SystemWindowQuery<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn PathProbe,
    profile: &'a PlatformProfile,
}

impl<'a> SystemWindowQuery<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        probe: &'a dyn PathProbe,
        profile: &'a PlatformProfile,
    ) -> Self {
        Self {
            runner,
            probe,
            profile,
        }
    }

    fn run_lines(&self, command: CommandSpec) -> io::Result<Vec<String>> {
        let output = self.runner.run(&command)?.check(&command)?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl WindowQuery for SystemWindowQuery<'_> {
    fn ide_window_titles(&self) -> io::Result<Vec<String>> {
        match self.profile.platform {
            Platform::MacOs => self.run_lines(
                CommandSpec::new("osascript")
                    .arg("-e")
                    .arg(window_titles_script(&self.profile.window_marker)),
            ),
            Platform::Windows => self.run_lines(CommandSpec::new("powershell").args([
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                windows_titles_command(&self.profile.window_marker, &self.profile.process_marker),
            ])),
            Platform::Linux => {
                let Some(wmctrl) = self.probe.find_in_path("wmctrl") else {
                    debug!("wmctrl not installed; skipping open-project detection");
                    return Ok(Vec::new());
                };
                let marker = self.profile.window_marker.to_lowercase();
                let titles = self.run_lines(CommandSpec::new(wmctrl).arg("-l"))?;
                Ok(titles
                    .iter()
                    .filter_map(|line| wmctrl_title(line))
                    .filter(|title| title.to_lowercase().contains(&marker))
                    .map(str::to_string)
                    .collect())
            }
        }
    }
}

/// Title column of a `wmctrl -l` line: `<id> <desktop> <host> <title...>`.
fn wmctrl_title(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    (!rest.is_empty()).then_some(rest)
}

// ─────────────────────────────────────────────────────────────────────────────
// Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the stateless adapters; [`SystemPorts::with`] wires the borrowing
/// ones together and lends the full [`Ports`] set.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPorts {
    runner: SystemRunner,
    probe: SystemProbe,
}

impl SystemPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the ports for `profile` and hand them to `f`.
    pub fn with<R>(&self, profile: &PlatformProfile, f: impl FnOnce(Ports<'_>) -> R) -> R {
        let uri = SystemUriOpener::new(&self.runner, profile.uri_launcher);
        let windows = SystemWindowQuery::new(&self.runner, &self.probe, profile);
        let apple = AppleScriptKeystrokes::new(&self.runner, profile.keystroke_process.clone());
        let keys: &dyn KeystrokeSimulator = if profile.keystroke_automation {
            &apple
        } else {
            &NoKeystrokes
        };

        f(Ports {
            runner: &self.runner,
            uri: &uri,
            keys,
            probe: &self.probe,
            windows: &windows,
        })
    }
}
