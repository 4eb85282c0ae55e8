//! # Market Value
//!
//! Estimates the dollar value of an MFL player card from comparable
//! marketplace listings, the player's own sale history, stat progression
//! and a handful of card-specific premiums and penalties.
//!
//! The estimate is a pure function of its inputs and the valuation time.
//! Fetching listings, sales and history is left to the caller.

pub mod adjustments;
pub mod base;
pub mod calculator;
pub mod cli;
pub mod comparables;
pub mod config;
pub mod error;
pub mod height;
pub mod history;
pub mod logging;
pub mod models;
pub mod rounding;

#[cfg(test)]
mod tests;

pub use calculator::{estimate_value, MarketValueCalculator};
pub use comparables::{ComparableCriteria, DEFAULT_COMPARABLE_LIMIT};
pub use config::{AdjustmentConfig, BaseValueConfig, ConfidenceConfig, ProgressionConfig, ValuationConfig};
pub use error::{Result, ValuationError};
pub use height::{format_height, Height};
pub use history::{annotate_sales, stats_at};
pub use models::{
    ComparableListing, Confidence, MarketValueEstimate, PlayerMetadata, ProgressionPoint,
    SaleRecord, ValuationInputs, ValueBreakdown, ValueDetails,
};
