//! Global weekboard configuration.
//!
//! Lives at `~/.config/weekboard/config.toml`; every value can also be set
//! through a `WEEKBOARD_*` environment variable (e.g. `WEEKBOARD_VAULT_DIR`),
//! which wins over the file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{BoardError, BoardResult};
use crate::session::DEFAULT_SUPPRESS_WINDOW;
use crate::watcher::DEFAULT_QUIET_PERIOD;

/// Default directory for daily notes.
pub const DEFAULT_VAULT_DIR: &str = "~/weekboard";

/// Default port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 5320;

fn default_vault_dir() -> String {
    DEFAULT_VAULT_DIR.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_quiet_ms() -> u64 {
    DEFAULT_QUIET_PERIOD.as_millis() as u64
}

fn default_suppress_ms() -> u64 {
    DEFAULT_SUPPRESS_WINDOW.as_millis() as u64
}

/// Global configuration shared by the CLI and the server.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Directory holding the daily note files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Port for weekboard-server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Milliseconds a changed note must stay quiet before its change is
    /// broadcast to watchers.
    #[serde(default = "default_quiet_ms")]
    pub quiet_ms: u64,

    /// Milliseconds after a local write during which incoming change events
    /// for that date are treated as echo.
    #[serde(default = "default_suppress_ms")]
    pub suppress_ms: u64,
}

impl BoardConfig {
    /// Path of the config file.
    pub fn config_path() -> BoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BoardError::Config("Could not determine config directory".to_string()))?
            .join("weekboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the configuration, creating a commented default file on first
    /// run so there is something to edit.
    pub fn load() -> BoardResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: BoardConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("WEEKBOARD").try_parsing(true))
            .build()
            .map_err(|e| BoardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BoardError::Config(e.to_string()))?;

        Ok(config)
    }

    /// The vault directory with `~` expanded.
    pub fn vault_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.vault_dir).into_owned())
    }

    /// The watcher quiet period as a duration.
    pub fn quiet_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.quiet_ms)
    }

    /// The client-side echo suppression window as a duration.
    pub fn suppress_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.suppress_ms)
    }

    /// Write a default config file with every option commented out.
    pub fn create_default_config(path: &Path) -> BoardResult<()> {
        let contents = format!(
            "\
# weekboard configuration

# Where your daily notes live:
# vault_dir = \"{DEFAULT_VAULT_DIR}\"

# Port for weekboard-server:
# port = {DEFAULT_PORT}

# How long (in milliseconds) a changed note must stay quiet before the
# change is broadcast:
# quiet_ms = 300

# How long (in milliseconds) your own writes suppress incoming change
# events for the same date:
# suppress_ms = 1000
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BoardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
