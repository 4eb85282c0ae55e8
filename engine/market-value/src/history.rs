//! Player stats reconstructed from progression history

use crate::models::{ProgressionPoint, SaleRecord};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Stats in effect at `at`.
///
/// Uses the latest snapshot on or before `at`. When every snapshot is later,
/// falls back to the earliest one, which is the closest thing known.
pub fn stats_at(at: DateTime<Utc>, progression: &[ProgressionPoint]) -> Option<&ProgressionPoint> {
    progression
        .iter()
        .filter(|p| p.date <= at)
        .max_by_key(|p| p.date)
        .or_else(|| progression.iter().min_by_key(|p| p.date))
}

/// Fill in each sale's missing overall from the history at its sale date
pub fn annotate_sales(sales: &[SaleRecord], progression: &[ProgressionPoint]) -> Vec<SaleRecord> {
    sales
        .iter()
        .map(|sale| {
            let mut sale = sale.clone();
            if sale.overall.is_none() {
                sale.overall = stats_at(sale.purchased_at, progression).map(|p| p.overall);
                if let Some(overall) = sale.overall {
                    debug!("Sale at {} annotated with overall {}", sale.purchased_at, overall);
                }
            }
            sale
        })
        .collect()
}
