//! Comparable listing selection

use crate::models::{ComparableListing, PlayerMetadata};
use position_ratings::Position;
use serde::{Deserialize, Serialize};

/// Default number of listings requested from the marketplace
pub const DEFAULT_COMPARABLE_LIMIT: usize = 50;

/// Query window for listings similar to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableCriteria {
    pub positions: Vec<Position>,
    pub age_min: i32,
    pub age_max: i32,
    pub overall_min: i32,
    pub overall_max: i32,
    pub limit: usize,
}

impl ComparableCriteria {
    /// Same positions, age and overall within one of the player's
    pub fn for_player(player: &PlayerMetadata) -> Self {
        Self {
            positions: player.positions.clone(),
            age_min: (player.age - 1).max(1),
            age_max: player.age + 1,
            overall_min: (player.overall - 1).max(1),
            overall_max: player.overall + 1,
            limit: DEFAULT_COMPARABLE_LIMIT,
        }
    }

    pub fn matches(&self, listing: &ComparableListing) -> bool {
        (self.age_min..=self.age_max).contains(&listing.age)
            && (self.overall_min..=self.overall_max).contains(&listing.overall)
            && listing.positions.iter().any(|p| self.positions.contains(p))
    }

    /// First `limit` listings inside the window, in feed order
    pub fn select(&self, listings: &[ComparableListing]) -> Vec<ComparableListing> {
        listings.iter().filter(|l| self.matches(l)).take(self.limit).cloned().collect()
    }
}
