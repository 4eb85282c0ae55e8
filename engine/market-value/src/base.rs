//! Base value from comparable listings and recent sales

use crate::config::BaseValueConfig;
use crate::models::{ComparableListing, SaleRecord};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Comparable listings after outlier removal
#[derive(Debug, Clone, PartialEq)]
pub struct ComparableBase {
    pub listings: Vec<ComparableListing>,
    /// Discounted average asking price
    pub average: f64,
    pub average_age: f64,
    pub average_overall: f64,
}

/// Sales that fed the weighted sale average
#[derive(Debug, Clone, PartialEq)]
pub struct SalesBase {
    pub sales: Vec<SaleRecord>,
    pub average: f64,
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Drop unusable and overpriced listings, then average and discount the rest.
///
/// Returns `None` when no listing survives.
pub fn comparable_base(
    listings: &[ComparableListing],
    config: &BaseValueConfig,
) -> Option<ComparableBase> {
    let priced: Vec<&ComparableListing> =
        listings.iter().filter(|l| l.price.is_finite() && l.price > 0.0).collect();
    if priced.len() < listings.len() {
        warn!("Ignoring {} listings without a usable price", listings.len() - priced.len());
    }
    if priced.is_empty() {
        return None;
    }

    let mut prices: Vec<f64> = priced.iter().map(|l| l.price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));
    let ceiling = median(&prices) * config.outlier_multiple;

    let kept: Vec<ComparableListing> =
        priced.into_iter().filter(|l| l.price <= ceiling).cloned().collect();
    if kept.len() < prices.len() {
        debug!("Dropped {} outlier listings above ${:.2}", prices.len() - kept.len(), ceiling);
    }

    let count = kept.len() as f64;
    let raw_average = kept.iter().map(|l| l.price).sum::<f64>() / count;
    let average_age = kept.iter().map(|l| l.age as f64).sum::<f64>() / count;
    let average_overall = kept.iter().map(|l| l.overall as f64).sum::<f64>() / count;

    Some(ComparableBase {
        average: raw_average * (1.0 - config.listing_discount),
        listings: kept,
        average_age,
        average_overall,
    })
}

/// Weight of a sale by age: 1.0 today, falling linearly to the floor
pub fn recency_weight(sale: &SaleRecord, now: DateTime<Utc>, config: &BaseValueConfig) -> f64 {
    let age_days = (now - sale.purchased_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    (1.0 - age_days / config.recency_horizon_days).clamp(config.min_sale_weight, 1.0)
}

/// Weight of a sale by how close the rating then was to the rating now
pub fn similarity_weight(sale_overall: i32, player_overall: i32, config: &BaseValueConfig) -> f64 {
    let gap = (sale_overall - player_overall).abs() as f64;
    (1.0 - gap / config.similarity_gap).clamp(config.min_sale_weight, 1.0)
}

/// Recency- and similarity-weighted average of the most recent sales.
///
/// A sale without a recorded rating is compared using the player's current
/// overall. Sales without a positive finite price are ignored; returns
/// `None` when no sale is left.
pub fn sales_base(
    sales: &[SaleRecord],
    player_overall: i32,
    now: DateTime<Utc>,
    config: &BaseValueConfig,
) -> Option<SalesBase> {
    let mut recent: Vec<SaleRecord> =
        sales.iter().filter(|s| s.price.is_finite() && s.price > 0.0).cloned().collect();
    if recent.len() < sales.len() {
        warn!("Ignoring {} sales without a usable price", sales.len() - recent.len());
    }
    if recent.is_empty() || config.max_recent_sales == 0 {
        return None;
    }

    recent.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
    recent.truncate(config.max_recent_sales);

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for sale in &recent {
        let overall_then = sale.overall.unwrap_or(player_overall);
        let weight = recency_weight(sale, now, config)
            * similarity_weight(overall_then, player_overall, config);
        weighted_sum += sale.price * weight;
        total_weight += weight;
    }

    let average = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        recent.iter().map(|s| s.price).sum::<f64>() / recent.len() as f64
    };

    Some(SalesBase { sales: recent, average })
}
