use std::path::Path;

use crate::arena::SupervisorConfig;
use crate::error::ConfigError;
use crate::game::{ScoringRule, DEFAULT_COLS, DEFAULT_ROWS};

/// Match settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub rows: usize,
    pub cols: usize,
    pub msec_per_move: u64,
    pub num_games: usize,
    /// Random moves played before each game; must be even.
    pub seed_moves: usize,
    /// Replay each seeded board with the colours reversed on even games.
    pub match_play: bool,
    pub scoring: ScoringRule,
    pub player_one: String,
    pub player_two: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            msec_per_move: 250,
            num_games: 2,
            seed_moves: 0,
            match_play: true,
            scoring: ScoringRule::FirstFour,
            player_one: "alphabeta".into(),
            player_two: "greedy".into(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub arena: ArenaConfig,
    pub supervisor: SupervisorConfig,
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
        let arena = &self.arena;
        if arena.rows < 4 || arena.cols < 4 {
            return Err(ConfigError::Validation(format!(
                "arena board must be at least 4x4, got {}x{}",
                arena.rows, arena.cols
            )));
        }
        if arena.num_games == 0 {
            return Err(ConfigError::Validation(
                "arena.num_games must be > 0".into(),
            ));
        }
        if arena.seed_moves % 2 != 0 {
            return Err(ConfigError::Validation(
                "arena.seed_moves must be even".into(),
            ));
        }
        if arena.seed_moves > arena.rows * arena.cols {
            return Err(ConfigError::Validation(
                "arena.seed_moves must be <= rows * cols".into(),
            ));
        }
        if arena.player_one.trim().is_empty() || arena.player_two.trim().is_empty() {
            return Err(ConfigError::Validation(
                "arena.player_one and arena.player_two must name an agent".into(),
            ));
        }

        if self.supervisor.overshoot_percent < 100 {
            return Err(ConfigError::Validation(
                "supervisor.overshoot_percent must be >= 100".into(),
            ));
        }
        if self.supervisor.grace_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "supervisor.grace_interval_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> String {
        // Serializing plain structs of numbers, bools and strings cannot fail.
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
