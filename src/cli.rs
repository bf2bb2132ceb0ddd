//! Command-line front end
//!
//! Parses arguments with clap and dispatches to the app crate. Output meant
//! for scripts goes to stdout; notifications go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use ibridge_app::{
    config_path, init_config, load_settings, run_jump, JumpContext, JumpRequest, StderrNotifier,
};
use ibridge_core::{logging, FileTarget};
use ibridge_launch::SystemPorts;
use tracing::info;

/// idea-bridge - Jump from any editor to the same file and line in IntelliJ IDEA
#[derive(Parser, Debug)]
#[command(name = "ibridge", version)]
#[command(about = "Open the current file at the cursor line in IntelliJ IDEA", long_about = None)]
pub struct Cli {
    /// Settings file (default: platform config dir, or $IBRIDGE_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a file at a line, opening its project first when needed
    Open {
        /// File to open, optionally suffixed with `:LINE`
        #[arg(value_name = "FILE[:LINE]")]
        file: Option<String>,

        /// Line number (overrides a `:LINE` suffix)
        #[arg(long, short)]
        line: Option<u32>,

        /// Treat the line as a 0-based editor cursor index
        #[arg(long)]
        zero_based: bool,

        /// Print the launch report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the project root detected for a file
    Root {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Report whether IntelliJ IDEA shows the project containing a directory
    Status {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a commented default settings file
    Init,
    /// Print the settings file location
    Path,
}

/// Result of a command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Run `cli` against the real system.
pub fn run(cli: Cli) -> Result<Outcome> {
    let path = config_path(cli.config.as_deref());
    let mut stdout = std::io::stdout().lock();

    if let Command::Config { action } = cli.command {
        return config_command(action, path.as_deref(), &mut stdout);
    }

    let settings = path.as_deref().map(load_settings).unwrap_or_default();
    let profile = settings.platform_profile();
    info!("Running {:?} on {}", cli.command, profile.platform);

    SystemPorts::new().with(&profile, |ports| {
        let ctx = JumpContext {
            settings: &settings,
            profile: &profile,
            ports,
            notifier: &StderrNotifier,
        };
        execute(&cli.command, &ctx, &mut stdout)
    })
}

/// Run a non-config command with an explicit context.
pub fn execute(command: &Command, ctx: &JumpContext<'_>, out: &mut dyn Write) -> Result<Outcome> {
    match command {
        Command::Open {
            file,
            line,
            zero_based,
            json,
        } => {
            let request = JumpRequest::from_arg(file.as_deref(), *line, *zero_based);
            match run_jump(&request, ctx) {
                Some(report) => {
                    if *json {
                        writeln!(out, "{}", report.to_json()?)?;
                    }
                    Ok(Outcome::Success)
                }
                None => Ok(failure()),
            }
        }
        Command::Root { file } => {
            let target = match FileTarget::resolve(file, FileTarget::MIN_LINE) {
                Ok(target) => target,
                Err(e) => {
                    ctx.notifier.error(&e.to_string());
                    return Ok(failure());
                }
            };
            match ctx.settings.root_locator().find(target.path()) {
                Some(root) => {
                    writeln!(out, "{}", root.path.display())?;
                    Ok(Outcome::Success)
                }
                None => {
                    ctx.notifier
                        .warn(&format!("No project root found for {}", target.path().display()));
                    Ok(Outcome::Failure)
                }
            }
        }
        Command::Status { dir } => match ctx.project_status(dir) {
            Some((root, open)) => {
                let state = if open { "open" } else { "not open" };
                writeln!(out, "{}: {} ({})", root.name(), state, root.path.display())?;
                Ok(Outcome::Success)
            }
            None => {
                ctx.notifier
                    .warn(&format!("No project root found for {}", dir.display()));
                Ok(Outcome::Failure)
            }
        },
        Command::Config { .. } => Err(eyre!("config commands do not take a launch context")),
    }
}

/// `config init` / `config path`
pub fn config_command(
    action: ConfigAction,
    path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let path = path.ok_or_else(|| eyre!("No configuration directory available on this platform"))?;
    match action {
        ConfigAction::Init => {
            init_config(path)?;
            writeln!(out, "Created {}", path.display())?;
        }
        ConfigAction::Path => {
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(Outcome::Success)
}

fn failure() -> Outcome {
    let log_file = logging::get_current_log_file();
    if log_file.exists() {
        eprintln!("Details: {}", log_file.display());
    }
    Outcome::Failure
}

