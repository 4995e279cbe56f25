//! Client configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML
//! file, `NOUGHTS_*` environment variables (a `.env` file is honored by the
//! binary), then command-line flags.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding the channel URL.
pub const URL_ENV: &str = "NOUGHTS_URL";

/// Environment variable overriding the player id.
pub const PLAYER_ID_ENV: &str = "NOUGHTS_PLAYER_ID";

/// Configuration for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket URL of the game peer.
    #[serde(default = "default_url")]
    url: String,

    /// Identity announced in the `connect` message.
    #[serde(default = "default_player_id")]
    player_id: String,

    /// File receiving tracing output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_url() -> String {
    "ws://localhost:8080/games/play".to_string()
}

fn default_player_id() -> String {
    "player".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("noughts_and_crosses.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            player_id: default_player_id(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        info!(url = %config.url, player_id = %config.player_id, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given, otherwise defaults, then applies the environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Applies `NOUGHTS_*` overrides read through `lookup`.
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.with_overrides(lookup(URL_ENV), lookup(PLAYER_ID_ENV), None)
    }

    /// Replaces fields that have an override.
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        player_id: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = url {
            debug!(url = %url, "Overriding url");
            self.url = url;
        }
        if let Some(player_id) = player_id {
            debug!(player_id = %player_id, "Overriding player id");
            self.player_id = player_id;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }
}
