//! # Position Ratings
//!
//! Converts a player's six card attributes into an overall rating (OVR) for
//! any of the fifteen MFL positions. Each position weights the attributes
//! differently, and playing away from the listed positions costs a penalty
//! taken from a hand-authored familiarity matrix.

pub mod calculator;
pub mod error;
pub mod familiarity;
pub mod types;
pub mod weights;


pub use calculator::{RatingCalculator, DEFAULT_BEST_POSITIONS};
pub use error::{RatingError, Result};
pub use types::{
    AllPositionRatings, Familiarity, PlayerAttributes, PlayerForRating, Position,
    PositionCategory, PositionRatingResult, RankedPosition, RatingFailure, RatingFailureKind,
};
pub use weights::AttributeWeights;

/// Rate `player` at `position` with the default calculator
pub fn rate_position(player: &PlayerForRating, position: Position) -> PositionRatingResult {
    RatingCalculator::new().rate_position(player, position)
}

/// Rate `player` at every position with the default calculator
pub fn rate_all_positions(player: &PlayerForRating) -> AllPositionRatings {
    RatingCalculator::new().rate_all_positions(player)
}

/// Top `limit` positions for `player`
pub fn best_positions(player: &PlayerForRating, limit: usize) -> Vec<RankedPosition> {
    RatingCalculator::new().best_positions(player, limit)
}
