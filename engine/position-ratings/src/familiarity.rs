//! Positional familiarity matrix.
//!
//! Rows are the primary position, columns the target position, both in
//! `Position::ALL` order. Tiers: 3 natural, 2 fairly familiar, 1 somewhat
//! familiar, 0 unfamiliar.

use crate::types::{Familiarity, Position};

#[rustfmt::skip]
static FAMILIARITY_MATRIX: [[u8; 15]; 15] = [
    //       GK CB LB RB LWB RWB CDM CM CAM LM RM LW RW CF ST
    /* GK  */ [3, 0, 0, 0, 0,  0,  0,  0, 0,  0, 0, 0, 0, 0, 0],
    /* CB  */ [0, 3, 1, 1, 0,  0,  1,  0, 0,  0, 0, 0, 0, 0, 0],
    /* LB  */ [0, 1, 3, 1, 2,  0,  0,  0, 0,  1, 0, 0, 0, 0, 0],
    /* RB  */ [0, 1, 1, 3, 0,  2,  0,  0, 0,  0, 1, 0, 0, 0, 0],
    /* LWB */ [0, 0, 2, 0, 3,  1,  0,  0, 0,  1, 0, 1, 0, 0, 0],
    /* RWB */ [0, 0, 0, 2, 1,  3,  0,  0, 0,  0, 1, 0, 1, 0, 0],
    /* CDM */ [0, 1, 0, 0, 0,  0,  3,  2, 1,  0, 0, 0, 0, 0, 0],
    /* CM  */ [0, 0, 0, 0, 0,  0,  2,  3, 2,  1, 1, 0, 0, 0, 0],
    /* CAM */ [0, 0, 0, 0, 0,  0,  1,  2, 3,  0, 0, 0, 0, 2, 0],
    /* LM  */ [0, 0, 1, 0, 1,  0,  0,  1, 0,  3, 1, 2, 0, 0, 0],
    /* RM  */ [0, 0, 0, 1, 0,  1,  0,  1, 0,  1, 3, 0, 2, 0, 0],
    /* LW  */ [0, 0, 0, 0, 1,  0,  0,  0, 0,  2, 0, 3, 1, 0, 0],
    /* RW  */ [0, 0, 0, 0, 0,  1,  0,  0, 0,  0, 2, 1, 3, 0, 0],
    /* CF  */ [0, 0, 0, 0, 0,  0,  0,  0, 2,  0, 0, 0, 0, 3, 2],
    /* ST  */ [0, 0, 0, 0, 0,  0,  0,  0, 0,  0, 0, 0, 0, 2, 3],
];

/// Familiarity tier of `target` for a player whose primary position is `primary`
pub fn tier(primary: Position, target: Position) -> u8 {
    FAMILIARITY_MATRIX[primary.index()][target.index()]
}

/// Rating penalty for a familiarity tier
pub fn penalty_for_tier(tier: u8) -> i32 {
    match tier {
        3 => 0,
        2 => -5,
        1 => -8,
        _ => -20,
    }
}

/// Familiarity tag for an unlisted target position
pub fn tag_for_tier(tier: u8) -> Familiarity {
    match tier {
        2 => Familiarity::FairlyFamiliar,
        1 => Familiarity::SomewhatFamiliar,
        0 => Familiarity::Unfamiliar,
        _ => Familiarity::Unknown,
    }
}
