//! idea-bridge - Jump from any editor to the same file and line in IntelliJ IDEA
//!
//! This is the binary entry point. All logic lives in the library.

use std::process::ExitCode;

use clap::Parser;
use ibridge_core::logging;
use idea_bridge::Cli;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // The jump still works without a log file
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    tracing::info!("idea-bridge {} starting", env!("CARGO_PKG_VERSION"));
    idea_bridge::run(cli).map(ExitCode::from)
}
