//! # Economy Error Types
//!
//! All errors that can occur in the economy system.

use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Attempted to take more items than the inventory holds.
    #[error("insufficient items: need {required} of {item}, have {available}")]
    InsufficientItems {
        /// Display name of the item.
        item: String,
        /// The amount required.
        required: u32,
        /// The amount available.
        available: u32,
    },

    /// No item kind has this id.
    #[error("unknown item id: {0}")]
    UnknownItemId(u8),

    /// No item kind has this name or key.
    #[error("unknown item name: {0:?}")]
    UnknownItemName(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
