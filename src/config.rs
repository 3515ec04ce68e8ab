use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{CONNECT, STANDARD_COLS, STANDARD_ROWS};

/// Board shape shared by every game of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: STANDARD_ROWS,
            columns: STANDARD_COLS,
        }
    }
}

/// Random self-play settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    /// Fixed RNG seed; games are seeded from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < CONNECT {
            return Err(ConfigError::Validation(format!(
                "board.rows must be >= {CONNECT}"
            )));
        }
        if self.board.columns < CONNECT {
            return Err(ConfigError::Validation(format!(
                "board.columns must be >= {CONNECT}"
            )));
        }
        if self.simulation.games == 0 {
            return Err(ConfigError::Validation(
                "simulation.games must be > 0".into(),
            ));
        }
        if log::LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
