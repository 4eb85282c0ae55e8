//! Market value estimation
//!
//! Combines comparable listings and recent sales into a base value, then
//! applies each premium and penalty against that same base.

use crate::adjustments;
use crate::base::{comparable_base, sales_base};
use crate::config::ValuationConfig;
use crate::error::{Result, ValuationError};
use crate::models::{Confidence, MarketValueEstimate, ValuationInputs, ValueBreakdown, ValueDetails};
use crate::rounding::{round_adjustment, round_dollars};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Market value calculator
#[derive(Debug, Clone, Default)]
pub struct MarketValueCalculator {
    config: ValuationConfig,
}

impl MarketValueCalculator {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Estimate a player's market value as of `now`.
    ///
    /// Missing market data lowers confidence and can produce a zero base
    /// value; only a missing player is an error.
    pub fn estimate(&self, inputs: &ValuationInputs, now: DateTime<Utc>) -> Result<MarketValueEstimate> {
        let player = inputs.player.as_ref().ok_or(ValuationError::MissingPlayerMetadata)?;
        let config = &self.config;

        info!(
            "Estimating market value for player {} ({} listings, {} sales, {} progression points)",
            player.id,
            inputs.comparable_listings.len(),
            inputs.recent_sales.len(),
            inputs.progression.len()
        );

        let comparables = comparable_base(&inputs.comparable_listings, &config.base);
        let sales = sales_base(&inputs.recent_sales, player.overall, now, &config.base);

        let base = match (&comparables, &sales) {
            (Some(c), Some(s)) => (c.average + s.average) / 2.0,
            (Some(c), None) => c.average,
            (None, Some(s)) => s.average,
            (None, None) => 0.0,
        };
        debug!("Base value ${:.2} for player {}", base, player.id);

        let retirement_years = inputs.retirement_years.or(player.retirement_years);
        let playable = adjustments::playable_positions(
            player,
            inputs.position_ratings.as_ref(),
            &config.adjustments,
        );

        let adj = &config.adjustments;
        let mut breakdown = ValueBreakdown {
            comparable_listings: comparables.as_ref().map_or(0, |c| c.listings.len()),
            recent_sales: sales.as_ref().map_or(0, |s| s.sales.len()),
            age_adjustment: round_adjustment(adjustments::age_adjustment(
                player,
                comparables.as_ref(),
                base,
                adj,
            )),
            overall_adjustment: round_adjustment(adjustments::overall_adjustment(
                player,
                comparables.as_ref(),
                base,
                adj,
            )),
            position_premium: round_adjustment(adjustments::position_premium(playable, base, adj)),
            progression_premium: round_adjustment(adjustments::progression_premium(
                player,
                &inputs.progression,
                retirement_years,
                base,
                &config.progression,
            )),
            retirement_penalty: round_adjustment(adjustments::retirement_penalty(
                retirement_years,
                base,
                adj,
            )),
            newly_mint_premium: round_adjustment(adjustments::newly_minted_premium(
                inputs.match_count,
                base,
                adj,
            )),
            pace_penalty: round_adjustment(adjustments::pace_penalty(player, base, adj)),
            pace_premium: round_adjustment(adjustments::pace_premium(player, base, adj)),
            height_adjustment: round_adjustment(adjustments::height_adjustment(player, base, adj)),
            total_adjustments: 0,
        };
        breakdown.total_adjustments = breakdown.adjustments().iter().map(|(_, v)| v).sum();

        let rounded_base = round_dollars(base);
        let mut value = (rounded_base + breakdown.total_adjustments).max(0);
        if (value - rounded_base).abs() as f64 <= 0.5 {
            value = rounded_base.max(0);
        }

        let confidence = self.confidence(breakdown.comparable_listings);

        info!(
            "Player {} valued at ${} ({:?} confidence, adjustments {:+})",
            player.id, value, confidence, breakdown.total_adjustments
        );

        Ok(MarketValueEstimate {
            estimated_value: value as u64,
            confidence,
            details: ValueDetails {
                comparable_listings: comparables.as_ref().map(|c| c.listings.clone()).unwrap_or_default(),
                recent_sales: sales.as_ref().map(|s| s.sales.clone()).unwrap_or_default(),
                comparable_average: comparables.as_ref().map_or(0, |c| round_dollars(c.average)),
                recent_sales_average: sales.as_ref().map_or(0, |s| round_dollars(s.average)),
                base_value: rounded_base,
            },
            breakdown,
        })
    }

    /// Confidence from the number of comparable listings kept
    pub fn confidence(&self, comparable_count: usize) -> Confidence {
        let thresholds = &self.config.confidence;
        if comparable_count >= thresholds.high_min_listings {
            Confidence::High
        } else if comparable_count >= thresholds.medium_min_listings {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Estimate with the default configuration
pub fn estimate_value(inputs: &ValuationInputs, now: DateTime<Utc>) -> Result<MarketValueEstimate> {
    MarketValueCalculator::default().estimate(inputs, now)
}
