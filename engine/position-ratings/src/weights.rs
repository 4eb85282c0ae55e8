//! Attribute weights per position.
//!
//! Each row is a percentage split over the six card attributes and sums to
//! 100. Goalkeepers put everything on Physical, which stands in for
//! goalkeeping in this model.

use crate::types::{PlayerAttributes, Position};
use serde::Serialize;

/// Percentage weights for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct AttributeWeights {
    pub pas: u8,
    pub sho: u8,
    pub def: u8,
    pub dri: u8,
    pub pac: u8,
    pub phy: u8,
}

const fn w(pas: u8, sho: u8, def: u8, dri: u8, pac: u8, phy: u8) -> AttributeWeights {
    AttributeWeights { pas, sho, def, dri, pac, phy }
}

/// Indexed by `Position::index()`
static WEIGHT_TABLE: [AttributeWeights; 15] = [
    //  PAS SHO DEF DRI PAC PHY
    w(0, 0, 0, 0, 0, 100),   // GK
    w(5, 0, 64, 9, 2, 20),   // CB
    w(19, 0, 44, 17, 10, 10), // LB
    w(19, 0, 44, 17, 10, 10), // RB
    w(19, 0, 44, 17, 10, 10), // LWB
    w(19, 0, 44, 17, 10, 10), // RWB
    w(28, 0, 40, 17, 0, 15), // CDM
    w(43, 12, 10, 29, 0, 6), // CM
    w(34, 21, 0, 38, 7, 0),  // CAM
    w(43, 12, 10, 29, 0, 6), // LM
    w(43, 12, 10, 29, 0, 6), // RM
    w(24, 23, 0, 40, 13, 0), // LW
    w(24, 23, 0, 40, 13, 0), // RW
    w(24, 23, 0, 40, 13, 0), // CF
    w(10, 46, 0, 29, 10, 5), // ST
];

impl AttributeWeights {
    pub fn for_position(position: Position) -> AttributeWeights {
        WEIGHT_TABLE[position.index()]
    }

    pub fn total(&self) -> u32 {
        [self.pas, self.sho, self.def, self.dri, self.pac, self.phy].iter().map(|&v| v as u32).sum()
    }

    /// Convex combination of the attributes under these weights
    pub fn weighted_average(&self, attrs: &PlayerAttributes) -> f64 {
        attrs.pas as f64 * (self.pas as f64 / 100.0)
            + attrs.sho as f64 * (self.sho as f64 / 100.0)
            + attrs.def as f64 * (self.def as f64 / 100.0)
            + attrs.dri as f64 * (self.dri as f64 / 100.0)
            + attrs.pac as f64 * (self.pac as f64 / 100.0)
            + attrs.phy as f64 * (self.phy as f64 / 100.0)
    }
}
