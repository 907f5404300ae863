//! # World Error Types
//!
//! Errors raised while building the world. Steady-state queries never fail;
//! they return `None` outside the loaded chunks.

use thiserror::Error;

/// Errors that can occur while constructing world components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A world configuration value is out of range.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),

    /// Two autotile patterns describe the same neighbor tuple.
    #[error("duplicate autotile pattern {pattern:04b}")]
    DuplicatePattern {
        /// The 4-bit neighbor mask (above, right, below, left).
        pattern: u8,
    },

    /// An autotile pattern uses bits outside the 4-bit neighbor mask.
    #[error("autotile pattern {pattern:#x} is not a 4-bit neighbor mask")]
    PatternOutOfRange {
        /// The offending raw value.
        pattern: u8,
    },
}

/// Result type for world construction.
pub type WorldResult<T> = Result<T, WorldError>;
