//! noughts_and_crosses - terminal client

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use noughts_and_crosses::{ClientConfig, run_tui};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            url,
            id,
            config,
            log_file,
        } => {
            let config = ClientConfig::load(config.as_deref())?.with_overrides(url, id, log_file);
            init_tracing(config.log_file())?;
            run_tui(&config).await
        }
    }
}

/// Sends tracing output to a file so it does not interfere with the TUI.
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    info!(log_file = %path.display(), "Tracing initialized");
    Ok(())
}
