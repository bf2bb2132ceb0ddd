//! Test utilities for launch testing
//!
//! Recording fakes for every capability port. Available to this crate's unit
//! tests and, through the `test-helpers` feature, to downstream crates.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::ports::{
    CommandOutput, CommandRunner, CommandSpec, KeystrokeSimulator, PathProbe, Ports, UriOpener,
    WindowQuery,
};

// ─────────────────────────────────────────────────────────────────────────────
// Command Runner
// ─────────────────────────────────────────────────────────────────────────────

/// Records every command; programs listed as failing return `NotFound`.
#[derive(Debug, Default)]
pub struct FakeRunner {
    failing: HashSet<String>,
    outputs: HashMap<String, CommandOutput>,
    ran: RefCell<Vec<CommandSpec>>,
    spawned: RefCell<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` (matched by file name) fail.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// Canned output for `run` of `program`. Defaults to empty success.
    pub fn with_output(mut self, program: &str, output: CommandOutput) -> Self {
        self.outputs.insert(program.to_string(), output);
        self
    }

    pub fn ran(&self) -> Vec<CommandSpec> {
        self.ran.borrow().clone()
    }

    pub fn spawned(&self) -> Vec<CommandSpec> {
        self.spawned.borrow().clone()
    }

    fn check_failing(&self, command: &CommandSpec) -> io::Result<()> {
        if self.failing.contains(&command.program_name()) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", command.program_name()),
            ));
        }
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        self.ran.borrow_mut().push(command.clone());
        self.check_failing(command)?;
        Ok(self
            .outputs
            .get(&command.program_name())
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn spawn_detached(&self, command: &CommandSpec) -> io::Result<()> {
        self.spawned.borrow_mut().push(command.clone());
        self.check_failing(command)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// URI Opener
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeUriOpener {
    fail: bool,
    opened: RefCell<Vec<String>>,
}

impl FakeUriOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// No handler registered for any scheme.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UriOpener for FakeUriOpener {
    fn open_uri(&self, uri: &str) -> io::Result<()> {
        self.opened.borrow_mut().push(uri.to_string());
        if self.fail {
            return Err(io::Error::other("no handler for URI scheme"));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keystrokes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystrokeCall {
    OpenFile { app: PathBuf, file: PathBuf, line: u32 },
    GoToLine { app: PathBuf, line: u32 },
}

#[derive(Debug, Default)]
pub struct FakeKeystrokes {
    fail: bool,
    calls: RefCell<Vec<KeystrokeCall>>,
}

impl FakeKeystrokes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<KeystrokeCall> {
        self.calls.borrow().clone()
    }

    fn result(&self) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "assistive access not granted",
            ));
        }
        Ok(())
    }
}

impl KeystrokeSimulator for FakeKeystrokes {
    fn open_file_at_line(&self, app: &Path, file: &Path, line: u32) -> io::Result<()> {
        self.calls.borrow_mut().push(KeystrokeCall::OpenFile {
            app: app.to_path_buf(),
            file: file.to_path_buf(),
            line,
        });
        self.result()
    }

    fn go_to_line(&self, app: &Path, line: u32) -> io::Result<()> {
        self.calls.borrow_mut().push(KeystrokeCall::GoToLine {
            app: app.to_path_buf(),
            line,
        });
        self.result()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Probe
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory filesystem and `PATH`.
#[derive(Debug, Default)]
pub struct FakeProbe {
    existing: HashSet<PathBuf>,
    dirs: HashMap<PathBuf, Vec<PathBuf>>,
    on_path: HashMap<String, PathBuf>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }

    pub fn with_dir_entries(mut self, dir: impl Into<PathBuf>, entries: Vec<PathBuf>) -> Self {
        self.dirs.insert(dir.into(), entries);
        self
    }

    pub fn with_program(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.on_path.insert(name.to_string(), path.into());
        self
    }
}

impl PathProbe for FakeProbe {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }

    fn list_dir(&self, dir: &Path) -> Vec<PathBuf> {
        self.dirs.get(dir).cloned().unwrap_or_default()
    }

    fn find_in_path(&self, program: &str) -> Option<PathBuf> {
        self.on_path.get(program).cloned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Query
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct StaticWindows {
    titles: Vec<String>,
    fail: bool,
    queries: RefCell<usize>,
}

impl StaticWindows {
    pub fn new<S: Into<String>>(titles: impl IntoIterator<Item = S>) -> Self {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of times the titles were requested.
    pub fn queries(&self) -> usize {
        *self.queries.borrow()
    }
}

impl WindowQuery for StaticWindows {
    fn ide_window_titles(&self) -> io::Result<Vec<String>> {
        *self.queries.borrow_mut() += 1;
        if self.fail {
            return Err(io::Error::other("window listing unavailable"));
        }
        Ok(self.titles.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// One fake of each port; override fields before calling [`FakeEnv::ports`].
#[derive(Debug, Default)]
pub struct FakeEnv {
    pub runner: FakeRunner,
    pub uri: FakeUriOpener,
    pub keys: FakeKeystrokes,
    pub probe: FakeProbe,
    pub windows: StaticWindows,
}

impl FakeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ports(&self) -> Ports<'_> {
        Ports {
            runner: &self.runner,
            uri: &self.uri,
            keys: &self.keys,
            probe: &self.probe,
            windows: &self.windows,
        }
    }
}
