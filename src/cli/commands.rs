//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load configuration (error if unreadable)
//! 2. Open the store and ensure the schema (failure is fatal; the
//!    process must not begin serving traffic)
//! 3. Run the axum server on a tokio runtime

use std::fs;
use std::path::Path;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::store::Store;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Loads the JSON config file. Unknown fields are ignored; missing
/// fields take their defaults.
fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CliError::config_error(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| CliError::config_error(format!("cannot parse {}: {}", path.display(), e)))
}

/// Write a default configuration file. Refuses to overwrite.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    let config = HttpServerConfig::default();
    let body = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::config_error(e.to_string()))?;
    fs::write(config_path, body).map_err(|e| {
        CliError::config_error(format!("cannot write {}: {}", config_path.display(), e))
    })?;

    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

/// Open the store and serve the gateway until the process is stopped.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    let store = Store::open(&config.db_path).map_err(|e| {
        Logger::fatal("BOOT_FAILED", &[("error", &e.to_string())]);
        CliError::boot_failed(e.to_string())
    })?;

    let server = HttpServer::new(store, config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run the fixed seed insertion directly against the store.
pub fn seed(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    let store = Store::open(&config.db_path)
        .map_err(|e| CliError::boot_failed(e.to_string()))?;
    let outcome = store
        .seed()
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    Logger::info(
        "SEED_COMPLETE",
        &[("inserted", &outcome.affected.to_string())],
    );
    Ok(())
}

/// Dispatch a parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Seed { config } => seed(&config),
    }
}
