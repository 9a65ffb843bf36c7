//! CLI module for sqlgate
//!
//! Provides the command-line interface:
//! - init: write a default config file
//! - serve: open the store and run the gateway server
//! - seed: one-shot sample-data insertion

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, seed, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
