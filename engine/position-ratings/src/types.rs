use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A pitch position as MFL lists it on a player card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    CB,
    LB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
}

/// Coarse grouping used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionCategory {
    #[serde(rename = "GK")]
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl Position {
    /// Every position, in table order
    pub const ALL: [Position; 15] = [
        Position::GK,
        Position::CB,
        Position::LB,
        Position::RB,
        Position::LWB,
        Position::RWB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::LM,
        Position::RM,
        Position::LW,
        Position::RW,
        Position::CF,
        Position::ST,
    ];

    /// Row/column index into the static tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::CB => "CB",
            Position::LB => "LB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
        }
    }

    pub fn category(self) -> PositionCategory {
        match self {
            Position::GK => PositionCategory::Goalkeeper,
            Position::CB | Position::LB | Position::RB | Position::LWB | Position::RWB => {
                PositionCategory::Defense
            }
            Position::CDM
            | Position::CM
            | Position::CAM
            | Position::LM
            | Position::RM
            | Position::LW
            | Position::RW => PositionCategory::Midfield,
            Position::CF | Position::ST => PositionCategory::Attack,
        }
    }

    /// Wingers and full-backs, whose ratings already price in raw speed
    pub fn is_wide(self) -> bool {
        matches!(
            self,
            Position::LW | Position::RW | Position::LB | Position::RB | Position::LWB | Position::RWB
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| RatingError::UnknownPosition(s.to_string()))
    }
}

/// The six weighted attributes of a player card.
///
/// Values are kept as read from the API (`i32`) so that out-of-range data is
/// caught by validation instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PlayerAttributes {
    pub pac: i32,
    pub sho: i32,
    pub pas: i32,
    pub dri: i32,
    pub def: i32,
    pub phy: i32,
    /// Goalkeeping; carried along but not part of the weighted model
    #[serde(default)]
    pub gk: i32,
}

impl PlayerAttributes {
    /// Named values in validation order
    pub fn named(&self) -> [(&'static str, i32); 6] {
        [
            ("PAC", self.pac),
            ("SHO", self.sho),
            ("PAS", self.pas),
            ("DRI", self.dri),
            ("DEF", self.def),
            ("PHY", self.phy),
        ]
    }

    /// Plain mean of the six weighted attributes
    pub fn mean(&self) -> f64 {
        let sum: i32 = self.named().iter().map(|(_, v)| v).sum();
        sum as f64 / 6.0
    }
}

/// Player shape consumed by the rating calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerForRating {
    pub id: u64,
    pub name: String,
    pub attributes: PlayerAttributes,
    /// Ordered; the first entry is the primary position
    pub positions: Vec<Position>,
}

impl PlayerForRating {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        attributes: PlayerAttributes,
        positions: Vec<Position>,
    ) -> Self {
        Self { id, name: name.into(), attributes, positions }
    }

    /// Build from raw position codes, rejecting anything unrecognized
    pub fn from_codes<S: AsRef<str>>(
        id: u64,
        name: impl Into<String>,
        attributes: PlayerAttributes,
        codes: &[S],
    ) -> Result<Self, RatingError> {
        let positions =
            codes.iter().map(|c| c.as_ref().parse()).collect::<Result<Vec<Position>, _>>()?;
        Ok(Self::new(id, name, attributes, positions))
    }

    pub fn primary_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }
}

/// How natural a target position is for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Familiarity {
    Primary,
    Secondary,
    FairlyFamiliar,
    SomewhatFamiliar,
    Unfamiliar,
    Unknown,
}

/// Error payload attached to a failed rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingFailure {
    #[serde(rename = "type")]
    pub kind: RatingFailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingFailureKind {
    CalculationError,
}

impl From<&RatingError> for RatingFailure {
    fn from(err: &RatingError) -> Self {
        Self { kind: RatingFailureKind::CalculationError, message: err.to_string() }
    }
}

/// Rating of one player at one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRatingResult {
    pub success: bool,
    pub position: Position,
    pub ovr: u8,
    /// Weighted attribute average before the familiarity penalty
    pub weighted_average: f64,
    pub penalty: i32,
    pub familiarity: Familiarity,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<RatingFailure>,
}

impl PositionRatingResult {
    pub fn failed(position: Position, err: &RatingError) -> Self {
        Self {
            success: false,
            position,
            ovr: 0,
            weighted_average: 0.0,
            penalty: 0,
            familiarity: Familiarity::Unfamiliar,
            error: Some(err.into()),
        }
    }
}

/// Ratings for every position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllPositionRatings {
    pub success: bool,
    pub player_id: u64,
    pub player_name: String,
    pub results: BTreeMap<Position, PositionRatingResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<RatingFailure>,
}

impl AllPositionRatings {
    /// Successful OVRs keyed by position, the shape the value engine consumes
    pub fn ovr_map(&self) -> BTreeMap<Position, u8> {
        self.results
            .iter()
            .filter(|(_, r)| r.success)
            .map(|(p, r)| (*p, r.ovr))
            .collect()
    }
}

/// Entry of a best-positions list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPosition {
    pub position: Position,
    pub ovr: u8,
}
