//! Error types for the market value calculator

use position_ratings::RatingError;
use thiserror::Error;

/// Result type for valuation operations
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Errors raised by the valuation crate.
///
/// Sparse market data is never an error; it yields a low-confidence
/// estimate instead.
#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Player metadata is required for market value calculation")]
    MissingPlayerMetadata,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
