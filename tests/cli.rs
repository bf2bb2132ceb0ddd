//! Integration tests for the `ibridge` command line

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use ibridge_app::notify::{Notice, RecordingNotifier};
use ibridge_app::{JumpContext, Settings};
use ibridge_launch::test_utils::{FakeEnv, FakeRunner, FakeUriOpener, StaticWindows};
use ibridge_launch::PlatformProfile;
use idea_bridge::cli::{config_command, execute};
use idea_bridge::{Cli, Command, ConfigAction, Outcome};
use tempfile::TempDir;

/// `<temp>/orders/{.git, src/Order.java}`
fn create_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("orders");
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    let file = root.join("src/Order.java");
    fs::write(&file, "class Order {}\n").unwrap();
    file
}

fn run_command(command: &Command, env: &FakeEnv) -> (Outcome, String, Vec<Notice>) {
    let settings = Settings::default();
    let profile = PlatformProfile::linux(None);
    let notifier = RecordingNotifier::new();
    let ctx = JumpContext {
        settings: &settings,
        profile: &profile,
        ports: env.ports(),
        notifier: &notifier,
    };

    let mut out = Vec::new();
    let code = execute(command, &ctx, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap(), notifier.notices())
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_parse_open_with_suffix_and_flags() {
    let cli = Cli::try_parse_from(["ibridge", "open", "src/Main.java:12", "--json"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Open {
            file: Some("src/Main.java:12".to_string()),
            line: None,
            zero_based: false,
            json: true,
        }
    );
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_open_without_file() {
    let cli = Cli::try_parse_from(["ibridge", "open", "--line", "3", "--zero-based"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Open {
            file: None,
            line: Some(3),
            zero_based: true,
            json: false,
        }
    );
}

#[test]
fn test_parse_rejects_negative_line() {
    assert!(Cli::try_parse_from(["ibridge", "open", "a.rs", "--line", "-4"]).is_err());
}

#[test]
fn test_parse_global_config_after_subcommand() {
    let cli =
        Cli::try_parse_from(["ibridge", "config", "path", "--config", "/tmp/ib.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/ib.toml")));
    assert_eq!(
        cli.command,
        Command::Config {
            action: ConfigAction::Path
        }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_open_prints_json_report() {
    let temp = TempDir::new().unwrap();
    let file = create_project(&temp);
    let env = FakeEnv::new();

    let command = Command::Open {
        file: Some(format!("{}:7", file.display())),
        line: None,
        zero_based: false,
        json: true,
    };
    let (code, out, notices) = run_command(&command, &env);

    assert_eq!(code, Outcome::Success);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["strategy"], "project-open");
    assert_eq!(report["target"]["line"], 7);
    assert_eq!(report["project_root"]["marker"], ".git");
    assert_eq!(notices.len(), 1);
}

#[test]
fn test_open_failure_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let file = create_project(&temp);
    let env = FakeEnv {
        runner: FakeRunner::new().failing("intellij-idea"),
        uri: FakeUriOpener::failing(),
        ..FakeEnv::new()
    };

    let command = Command::Open {
        file: Some(file.display().to_string()),
        line: Some(1),
        zero_based: false,
        json: true,
    };
    let (code, out, notices) = run_command(&command, &env);

    assert_eq!(code, Outcome::Failure);
    assert!(out.is_empty());
    assert!(matches!(&notices[..], [Notice::Error(_)]));
}

#[test]
fn test_root_prints_detected_root() {
    let temp = TempDir::new().unwrap();
    let file = create_project(&temp);

    let (code, out, _) = run_command(&Command::Root { file }, &FakeEnv::new());

    assert_eq!(code, Outcome::Success);
    assert!(Path::new(out.trim()).ends_with("orders"));
}

#[test]
fn test_status_reports_open_state() {
    let temp = TempDir::new().unwrap();
    create_project(&temp);
    let env = FakeEnv {
        windows: StaticWindows::new(["orders – Order.java - IntelliJ IDEA"]),
        ..FakeEnv::new()
    };

    let command = Command::Status {
        dir: temp.path().join("orders"),
    };
    let (code, out, _) = run_command(&command, &env);

    assert_eq!(code, Outcome::Success);
    assert!(out.starts_with("orders: open ("));
}

#[test]
fn test_config_init_then_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cfg/config.toml");

    let mut out = Vec::new();
    config_command(ConfigAction::Init, Some(&path), &mut out).unwrap();
    assert!(path.exists());
    assert!(String::from_utf8(out).unwrap().starts_with("Created "));

    let mut out = Vec::new();
    config_command(ConfigAction::Path, Some(&path), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim(), path.display().to_string());

    // Refuses to overwrite
    assert!(config_command(ConfigAction::Init, Some(&path), &mut Vec::new()).is_err());
}
