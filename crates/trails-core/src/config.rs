//! Configuration loading and typed config structures for a game.
//!
//! The canonical configuration is a YAML file (`trails-config.yaml` by
//! convention). This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads the file. Every field has a
//! default, so an empty document is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use trails_types::Strategy;

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

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Board dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Game rules and bounds.
    #[serde(default)]
    pub rules: RulesConfig,

    /// The agent roster. When empty, the default three-agent roster is
    /// used: two self-interested agents and one cooperative, all heading
    /// for the far corner.
    #[serde(default)]
    pub agents: Vec<AgentConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Board width in cells.
    #[serde(default = "default_grid_side")]
    pub width: u32,

    /// Board height in cells.
    #[serde(default = "default_grid_side")]
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_side(),
            height: default_grid_side(),
        }
    }
}

fn default_grid_side() -> u32 {
    5
}

/// Game rules and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// RNG seed for the board, activation shuffles, and goodwill rolls.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Most turns a game may run before ending without a winner.
    #[serde(default = "default_max_turns")]
    pub max_turns: u64,

    /// Consecutive blocked turns per agent before the board counts as
    /// stuck.
    #[serde(default = "default_stagnation_threshold")]
    pub stagnation_threshold: u32,

    /// Random coins dealt to each agent at setup.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_turns: default_max_turns(),
            stagnation_threshold: default_stagnation_threshold(),
            starting_coins: default_starting_coins(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_max_turns() -> u64 {
    100
}

fn default_stagnation_threshold() -> u32 {
    3
}

fn default_starting_coins() -> u32 {
    8
}

/// One agent in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentConfig {
    /// Agent name for logs and reports.
    pub name: String,

    /// Which decision logic this agent runs.
    pub strategy: Strategy,

    /// Starting cell. Defaults to the origin.
    #[serde(default)]
    pub start: CoordConfig,

    /// Goal cell. When omitted, the far corner of the board.
    #[serde(default)]
    pub goal: Option<CoordConfig>,
}

/// A cell coordinate in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CoordConfig {
    /// Horizontal position.
    #[serde(default)]
    pub x: u32,
    /// Vertical position.
    #[serde(default)]
    pub y: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. `info` or `trails_core=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_owned()
}
