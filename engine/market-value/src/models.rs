use chrono::{DateTime, Utc};
use position_ratings::{PlayerAttributes, PlayerForRating, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player card metadata as read from the MFL API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetadata {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub overall: i32,
    pub age: i32,
    /// Height in centimetres
    #[serde(default)]
    pub height: u32,
    pub positions: Vec<Position>,
    #[serde(default)]
    pub retirement_years: Option<u32>,
    pub pace: i32,
    pub shooting: i32,
    pub passing: i32,
    pub dribbling: i32,
    pub defense: i32,
    pub physical: i32,
    #[serde(default)]
    pub goalkeeping: i32,
}

impl PlayerMetadata {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn primary_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.primary_position() == Some(Position::GK)
    }

    pub fn attributes(&self) -> PlayerAttributes {
        PlayerAttributes {
            pac: self.pace,
            sho: self.shooting,
            pas: self.passing,
            dri: self.dribbling,
            def: self.defense,
            phy: self.physical,
            gk: self.goalkeeping,
        }
    }

    /// Shape consumed by the position rating calculator
    pub fn for_rating(&self) -> PlayerForRating {
        PlayerForRating::new(self.id, self.full_name(), self.attributes(), self.positions.clone())
    }
}

/// An active marketplace listing used as a price reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableListing {
    #[serde(default)]
    pub listing_id: String,
    pub price: f64,
    pub overall: i32,
    pub age: i32,
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// A completed sale of the player being valued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub price: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub purchased_at: DateTime<Utc>,
    /// Overall rating at the time of sale, when known
    #[serde(default)]
    pub overall: Option<i32>,
}

/// One snapshot of the player's stats history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionPoint {
    pub date: DateTime<Utc>,
    pub age: i32,
    pub overall: i32,
    #[serde(default)]
    pub pace: i32,
    #[serde(default)]
    pub shooting: i32,
    #[serde(default)]
    pub passing: i32,
    #[serde(default)]
    pub dribbling: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub physical: i32,
}

/// Everything the value calculator needs for one player.
///
/// `player` is optional only so that a snapshot read from disk can be
/// rejected with a typed error; a missing player is a caller bug, not a
/// sparse-data case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInputs {
    pub player: Option<PlayerMetadata>,
    #[serde(default)]
    pub comparable_listings: Vec<ComparableListing>,
    #[serde(default)]
    pub recent_sales: Vec<SaleRecord>,
    #[serde(default)]
    pub progression: Vec<ProgressionPoint>,
    /// Computed OVR per position. `None` means not supplied, which switches
    /// the position premium to counting listed positions. An empty map is
    /// a supplied mapping with no playable positions.
    #[serde(default)]
    pub position_ratings: Option<BTreeMap<Position, u8>>,
    #[serde(default)]
    pub retirement_years: Option<u32>,
    /// Number of recent matches, used as an experience proxy
    #[serde(default)]
    pub match_count: Option<u32>,
}

impl ValuationInputs {
    pub fn for_player(player: PlayerMetadata) -> Self {
        Self { player: Some(player), ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Rounded, itemized adjustments. Every field is present on every estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueBreakdown {
    pub comparable_listings: usize,
    pub recent_sales: usize,
    pub age_adjustment: i64,
    pub overall_adjustment: i64,
    pub position_premium: i64,
    pub progression_premium: i64,
    pub retirement_penalty: i64,
    pub newly_mint_premium: i64,
    pub pace_penalty: i64,
    pub pace_premium: i64,
    pub height_adjustment: i64,
    pub total_adjustments: i64,
}

impl ValueBreakdown {
    /// Named adjustments in evaluation order
    pub fn adjustments(&self) -> [(&'static str, i64); 9] {
        [
            ("ageAdjustment", self.age_adjustment),
            ("overallAdjustment", self.overall_adjustment),
            ("positionPremium", self.position_premium),
            ("progressionPremium", self.progression_premium),
            ("retirementPenalty", self.retirement_penalty),
            ("newlyMintPremium", self.newly_mint_premium),
            ("pacePenalty", self.pace_penalty),
            ("pacePremium", self.pace_premium),
            ("heightAdjustment", self.height_adjustment),
        ]
    }
}

/// Inputs and intermediate values behind an estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueDetails {
    pub comparable_listings: Vec<ComparableListing>,
    pub recent_sales: Vec<SaleRecord>,
    pub comparable_average: i64,
    pub recent_sales_average: i64,
    pub base_value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketValueEstimate {
    pub estimated_value: u64,
    pub confidence: Confidence,
    pub breakdown: ValueBreakdown,
    pub details: ValueDetails,
}

impl MarketValueEstimate {
    /// No comparable or sale data backed the estimate
    pub fn is_unknown(&self) -> bool {
        self.details.base_value == 0
            && self.breakdown.comparable_listings == 0
            && self.breakdown.recent_sales == 0
    }

    /// Display string; unknown values render as "Unknown" rather than "$0"
    pub fn display_value(&self) -> String {
        if self.is_unknown() {
            "Unknown".to_string()
        } else {
            format!("${}", self.estimated_value)
        }
    }
}
