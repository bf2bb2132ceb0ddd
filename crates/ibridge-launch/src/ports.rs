//! Capability ports used by the launcher
//!
//! Everything that touches the operating system goes through one of these
//! narrow traits so the orchestration logic stays platform-agnostic. Real
//! adapters live in [`crate::system`]; fakes live in `test_utils`.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Command Description
// ─────────────────────────────────────────────────────────────────────────────

/// A program plus its argument list. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as lossy UTF-8, for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// File name of the program (`idea.sh`, `open`, ...).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {:?}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a command that was waited on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Turn a non-zero exit into an error naming the command.
    pub fn check(self, command: &CommandSpec) -> io::Result<Self> {
        if self.success {
            return Ok(self);
        }
        let code = self
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let stderr = self.stderr.trim();
        Err(io::Error::other(if stderr.is_empty() {
            format!("{} exited with {}", command.program_name(), code)
        } else {
            format!("{} exited with {}: {}", command.program_name(), code, stderr)
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ports
// ─────────────────────────────────────────────────────────────────────────────

/// Runs external programs.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run to completion and capture output. Used for short queries and
    /// OS helpers (`open`, `osascript`, `powershell`) that return quickly.
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput>;

    /// Start without waiting and without keeping a handle. The child must
    /// outlive this process and must not inherit its stdio.
    fn spawn_detached(&self, command: &CommandSpec) -> io::Result<()>;
}

/// Hands a URI to the OS default handler.
#[cfg_attr(test, mockall::automock)]
pub trait UriOpener {
    fn open_uri(&self, uri: &str) -> io::Result<()>;
}

/// Drives the IDE through simulated keyboard input.
#[cfg_attr(test, mockall::automock)]
pub trait KeystrokeSimulator {
    /// Activate `app`, open `file` and move the caret to `line`.
    fn open_file_at_line(&self, app: &Path, file: &Path, line: u32) -> io::Result<()>;

    /// Activate `app` and move the caret in the current editor to `line`.
    fn go_to_line(&self, app: &Path, line: u32) -> io::Result<()>;
}

/// Read-only filesystem and `PATH` lookups.
#[cfg_attr(test, mockall::automock)]
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;

    /// Entries of `dir`, empty when it cannot be read.
    fn list_dir(&self, dir: &Path) -> Vec<PathBuf>;

    /// Resolve a bare program name through `PATH`.
    fn find_in_path(&self, program: &str) -> Option<PathBuf>;
}

/// Lists titles of IDE windows currently on screen.
#[cfg_attr(test, mockall::automock)]
pub trait WindowQuery {
    fn ide_window_titles(&self) -> io::Result<Vec<String>>;
}

/// The set of ports the launcher needs, borrowed for one invocation.
#[derive(Clone, Copy)]
pub struct Ports<'a> {
    pub runner: &'a dyn CommandRunner,
    pub uri: &'a dyn UriOpener,
    pub keys: &'a dyn KeystrokeSimulator,
    pub probe: &'a dyn PathProbe,
    pub windows: &'a dyn WindowQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let spec = CommandSpec::new("/opt/idea/bin/idea.sh")
            .arg("--line")
            .args(["12", "/src/Main.java"]);

        assert_eq!(spec.program, PathBuf::from("/opt/idea/bin/idea.sh"));
        assert_eq!(spec.args_lossy(), vec!["--line", "12", "/src/Main.java"]);
        assert_eq!(spec.program_name(), "idea.sh");
    }

    #[test]
    fn test_command_spec_display_quotes_args() {
        let spec = CommandSpec::new("open").args(["-a", "/Applications/IntelliJ IDEA.app"]);
        assert_eq!(
            spec.to_string(),
            "open \"-a\" \"/Applications/IntelliJ IDEA.app\""
        );
    }

    #[test]
    fn test_output_check_success() {
        let spec = CommandSpec::new("xdg-open");
        let output = CommandOutput::ok("done").check(&spec).unwrap();
        assert_eq!(output.stdout, "done");
    }

    #[test]
    fn test_output_check_failure_mentions_program_and_stderr() {
        let spec = CommandSpec::new("/usr/bin/xdg-open");
        let err = CommandOutput::failed(4, "no handler for ideaapp\n")
            .check(&spec)
            .unwrap_err();
        assert_eq!(err.to_string(), "xdg-open exited with 4: no handler for ideaapp");
    }

    #[test]
    fn test_output_check_failure_without_code() {
        let spec = CommandSpec::new("osascript");
        let output = CommandOutput {
            success: false,
            code: None,
            ..Default::default()
        };
        let err = output.check(&spec).unwrap_err();
        assert_eq!(err.to_string(), "osascript exited with signal");
    }
}
