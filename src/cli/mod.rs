//! CLI module for fedcat
//!
//! Provides the command-line interface:
//! - resolve: LFN to PFN (or reverse) translation
//! - stat / ls / rm / mkdir / rmdir: file operations through the
//!   protocol backend picked by catalog resolution

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
