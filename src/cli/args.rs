//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlgate init --config <path>
//! - sqlgate serve --config <path>
//! - sqlgate seed --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sqlgate - A guarded SQL execution gateway
#[derive(Parser, Debug)]
#[command(name = "sqlgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./sqlgate.json")]
        config: PathBuf,
    },

    /// Open the store and serve the gateway
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./sqlgate.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Insert the fixed sample records directly into the store
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./sqlgate.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
