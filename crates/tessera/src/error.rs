//! # Game Error Types
//!
//! Configuration and lifecycle errors. Steady-state simulation never fails:
//! queries outside the world are `None`, impossible actions return `false`.

use std::path::PathBuf;

use tessera_economy::EconomyError;
use tessera_procedural::WorldError;
use thiserror::Error;

/// Errors raised while loading or checking a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for `GameConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),

    /// The `[world]` section is unusable.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A starting inventory entry names no item.
    #[error(transparent)]
    Item(#[from] EconomyError),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the simulation lifecycle.
#[derive(Error, Debug)]
pub enum GameError {
    /// `start` was called on a loop that is already running.
    #[error("game loop is already running")]
    AlreadyRunning,

    /// A frame was requested from a stopped loop.
    #[error("game loop is not running")]
    NotRunning,

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The world could not be built.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result type for simulation lifecycle operations.
pub type GameResult<T> = Result<T, GameError>;
