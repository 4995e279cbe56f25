//! Command-line interface for noughts_and_crosses.

use clap::{Parser, Subcommand};

/// noughts and crosses - two players, one board, one WebSocket
#[derive(Parser, Debug)]
#[command(name = "noughts_and_crosses")]
#[command(about = "Two-player noughts and crosses over a WebSocket channel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join a game in the terminal
    Play {
        /// WebSocket URL of the game peer
        #[arg(long)]
        url: Option<String>,

        /// Player id announced to the peer
        #[arg(long)]
        id: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// File receiving log output
        #[arg(long)]
        log_file: Option<std::path::PathBuf>,
    },
}
