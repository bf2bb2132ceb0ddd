//! idea-bridge Library
//!
//! Command-line front end over the `ibridge-*` crates.

pub mod cli;

pub use cli::{run, Cli, Command, ConfigAction, Outcome};
