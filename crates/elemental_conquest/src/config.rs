//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use elemental_engine::{Difficulty, Element, MapSize, PlayerSetup, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Match and storage settings for the conquest binary.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board preset used when no explicit grid size is given.
    #[serde(default)]
    map_size: MapSize,

    /// Explicit grid size, overriding the preset.
    #[serde(default)]
    #[getter(skip)]
    grid_size: Option<usize>,

    /// Seats in turn order.
    #[serde(default = "default_players")]
    players: Vec<PlayerSetup>,

    /// AI difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Seed for AI choices and elemental chance; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where match results are stored.
    #[serde(default = "default_stats_path")]
    stats_path: PathBuf,

    /// Turns played before a match is called a stalemate.
    #[serde(default = "default_turn_limit")]
    turn_limit: u32,
}

#[instrument]
fn default_players() -> Vec<PlayerSetup> {
    vec![PlayerSetup::human(Element::Fire), PlayerSetup::ai(Element::Water)]
}

#[instrument]
fn default_stats_path() -> PathBuf {
    PathBuf::from("elemental_stats.json")
}

#[instrument]
fn default_turn_limit() -> u32 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_size: MapSize::default(),
            grid_size: None,
            players: default_players(),
            difficulty: Difficulty::default(),
            seed: None,
            stats_path: default_stats_path(),
            turn_limit: default_turn_limit(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(players = config.players.len(), grid_size = config.grid_size(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError`] if the text is not a valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, AppConfigError> {
        toml::from_str(content).map_err(|e| AppConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppConfigError`] if an existing file is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, AppConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Effective grid size: the explicit size, else the preset's.
    pub fn grid_size(&self) -> usize {
        self.grid_size.unwrap_or_else(|| self.map_size.grid_size())
    }

    /// Overrides the grid size.
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    /// Overrides the seats.
    pub fn with_players(mut self, players: Vec<PlayerSetup>) -> Self {
        self.players = players;
        self
    }

    /// Overrides the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the stats file.
    pub fn with_stats_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stats_path = path.into();
        self
    }

    /// Overrides the turn limit.
    pub fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    /// Validated engine configuration for one match.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`elemental_engine::ConfigError`] for an invalid
    /// grid or roster.
    #[instrument(skip(self))]
    pub fn session_config(&self) -> Result<SessionConfig, elemental_engine::ConfigError> {
        let config = SessionConfig::new(self.grid_size(), self.players.clone()).with_difficulty(self.difficulty);
        config.validate()?;
        Ok(config)
    }
}

/// Application configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct AppConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AppConfigError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.grid_size(), 10);
        assert_eq!(*config.turn_limit(), 1000);
    }

    #[test]
    fn test_explicit_grid_beats_preset() {
        let config = AppConfig::from_toml("map_size = \"large\"\ngrid_size = 6\n").unwrap();
        assert_eq!(*config.map_size(), MapSize::Large);
        assert_eq!(config.grid_size(), 6);
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let err = AppConfig::from_toml("difficulty = \"impossible\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
