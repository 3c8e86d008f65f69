//! Configuration loading and typed config structures for Life Duel.
//!
//! The canonical configuration lives in `lifeduel-config.yaml` at the
//! project root. Every field has a default matching the reference game
//! (30x50 board, multiplayer, 1000-generation cap, 30% live cells, 100 ms
//! ticks), so an empty or missing file is valid.

use std::path::Path;

use lifeduel_types::GameMode;
use serde::Deserialize;

use crate::session::SessionConfig;

/// Environment variable overriding `game.seed`.
pub const SEED_ENV_VAR: &str = "LIFEDUEL_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `lifeduel-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DuelConfig {
    /// Board dimensions.
    #[serde(default)]
    pub board: BoardConfig,

    /// Game rules: mode, cap, seeding.
    #[serde(default)]
    pub game: GameConfig,

    /// Tick scheduling.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DuelConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `LIFEDUEL_SEED` overrides `game.seed` when set to a valid `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.game.apply_env_overrides();
        Ok(config)
    }

    /// Session parameters derived from the board and game sections.
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rows: self.board.rows,
            cols: self.board.cols,
            mode: self.game.mode,
            generation_cap: self.game.generation_cap,
            seed: self.game.seed,
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns.
    #[serde(default = "default_cols")]
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

/// Game rules.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GameConfig {
    /// `single` or `multiplayer`.
    #[serde(default)]
    pub mode: GameMode,

    /// Generations allowed before a multiplayer match is forced to end.
    #[serde(default = "default_generation_cap")]
    pub generation_cap: u64,

    /// Probability that a cell starts alive when the board is randomized.
    #[serde(default = "default_live_probability")]
    pub live_probability: f64,

    /// RNG seed for reproducible boards. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Apply `LIFEDUEL_SEED` if it holds a valid `u64`.
    fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var(SEED_ENV_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            self.seed = Some(seed);
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            generation_cap: default_generation_cap(),
            live_probability: default_live_probability(),
            seed: None,
        }
    }
}

/// Tick scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (0 = unlimited). Single-player boards
    /// with oscillators never stall, so headless runs need a bound.
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Logging output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Dump the board at `debug` level every N ticks (0 = never).
    #[serde(default)]
    pub board_every: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            board_every: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_rows() -> usize {
    lifeduel_grid::DEFAULT_ROWS
}

const fn default_cols() -> usize {
    lifeduel_grid::DEFAULT_COLS
}

const fn default_generation_cap() -> u64 {
    crate::session::DEFAULT_GENERATION_CAP
}

const fn default_live_probability() -> f64 {
    crate::session::DEFAULT_LIVE_PROBABILITY
}

const fn default_tick_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_game() {
        let config = DuelConfig::default();
        assert_eq!(config.board.rows, 30);
        assert_eq!(config.board.cols, 50);
        assert_eq!(config.game.mode, GameMode::Multiplayer);
        assert_eq!(config.game.generation_cap, 1000);
        assert_eq!(config.game.live_probability, 0.3);
        assert_eq!(config.schedule.tick_interval_ms, 100);
        assert_eq!(config.schedule.max_ticks, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
board:
  rows: 12
  cols: 20

game:
  mode: single
  generation_cap: 50
  live_probability: 0.25
  seed: 99

schedule:
  tick_interval_ms: 250
  max_ticks: 400

logging:
  level: "debug"
  json: true
  board_every: 25
"#;
        let config = DuelConfig::parse(yaml).unwrap();
        assert_eq!(config.board.rows, 12);
        assert_eq!(config.board.cols, 20);
        assert_eq!(config.game.mode, GameMode::Single);
        assert_eq!(config.game.generation_cap, 50);
        assert_eq!(config.game.live_probability, 0.25);
        assert_eq!(config.schedule.tick_interval_ms, 250);
        assert_eq!(config.schedule.max_ticks, 400);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.logging.board_every, 25);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = DuelConfig::parse("board:\n  rows: 8\n").unwrap();
        assert_eq!(config.board.rows, 8);
        // Everything else uses defaults
        assert_eq!(config.board.cols, 50);
        assert_eq!(config.game.generation_cap, 1000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(DuelConfig::parse("").is_ok());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = DuelConfig::parse("game:\n  mode: coop\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn session_config_carries_board_and_game() {
        let config = DuelConfig::parse("board:\n  rows: 8\n  cols: 9\ngame:\n  generation_cap: 7\n")
            .unwrap();
        let session = config.session_config();
        assert_eq!(session.rows, 8);
        assert_eq!(session.cols, 9);
        assert_eq!(session.generation_cap, 7);
        assert_eq!(session.mode, GameMode::Multiplayer);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("lifeduel-config.yaml");
        if path.exists() {
            let config = DuelConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
