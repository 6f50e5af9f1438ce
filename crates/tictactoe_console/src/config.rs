//! Console configuration loaded from TOML.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_engine::Settings;
use tracing::{debug, info, instrument};

/// Settings for a console session.
///
/// ```toml
/// seed = 42
/// history_dir = ".tictactoe"
/// log_level = "info"
///
/// [settings]
/// opponent_mode = "computer"
/// first_player = "player"
/// difficulty = "hard"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Engine settings.
    #[serde(default)]
    settings: Settings,

    /// Seed for the computer's random choices; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Directory holding the match history.
    #[serde(default = "default_history_dir")]
    history_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[instrument]
fn default_history_dir() -> PathBuf {
    PathBuf::from(".tictactoe")
}

#[instrument]
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            seed: None,
            history_dir: default_history_dir(),
            log_level: default_log_level(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConsoleConfigError> {
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file; using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConsoleConfigError::new(format!("Failed to read config file: {}", e)));
            }
        };

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ConsoleConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.settings = Settings::new(
            *config.settings.opponent_mode(),
            *config.settings.first_player(),
            *config.settings.difficulty(),
        );

        info!(settings = ?config.settings, "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line flags on top of the file values.
    #[instrument(skip(self, cli))]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        self.settings = Settings::new(
            cli.mode.unwrap_or(*self.settings.opponent_mode()),
            cli.first.unwrap_or(*self.settings.first_player()),
            cli.difficulty.unwrap_or(*self.settings.difficulty()),
        );
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(dir) = &cli.history_dir {
            self.history_dir = dir.clone();
        }
        debug!(settings = ?self.settings, seed = ?self.seed, "Overrides applied");
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConsoleConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConsoleConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
