//! Error types for the position rating calculator

use thiserror::Error;

/// Result type for rating operations
pub type Result<T> = std::result::Result<T, RatingError>;

/// Problems with the player data handed to the calculator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("Invalid attribute {attribute}: must be 0-99 (got {value})")]
    AttributeOutOfRange { attribute: &'static str, value: i32 },

    #[error("Positions must be a non-empty list")]
    NoPositions,

    #[error("Invalid position: {0}")]
    UnknownPosition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
