//! Configuration for the market value calculator.
//!
//! Every coefficient the estimate uses lives here. `Default` reproduces the
//! documented behaviour; a TOML file or `MV_*` environment variables can
//! override individual values.

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    pub base: BaseValueConfig,
    pub adjustments: AdjustmentConfig,
    pub progression: ProgressionConfig,
    pub confidence: ConfidenceConfig,
}

/// How comparable listings and sales become a base value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseValueConfig {
    /// Listings priced above this multiple of the median are dropped
    pub outlier_multiple: f64,

    /// Discount applied to the listing average (ask vs. sold gap)
    pub listing_discount: f64,

    /// Most recent sales considered
    pub max_recent_sales: usize,

    /// Days over which sale recency weight decays to the floor
    pub recency_horizon_days: f64,

    /// Overall-rating gap over which similarity weight decays to the floor
    pub similarity_gap: f64,

    /// Lower bound for both sale weights
    pub min_sale_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    /// Fraction of base per year of age difference to the comparables
    pub age_rate_per_year: f64,

    /// Fraction of base per overall point difference to the comparables
    pub overall_rate_per_point: f64,

    /// A position counts as playable within this many points of overall
    pub playable_position_margin: i32,
    pub two_position_premium: f64,
    pub multi_position_premium: f64,

    /// Retirement penalties for 1, 2 and 3 years remaining
    pub retirement_penalties: [f64; 3],

    /// Players with fewer recent matches than this count as newly minted
    pub newly_minted_max_matches: u32,
    pub newly_minted_premium: f64,

    pub slow_overall_threshold: i32,
    pub slow_pace_threshold: i32,
    pub slow_pace_penalty: f64,

    pub fast_pace_threshold: i32,
    pub very_fast_pace_threshold: i32,
    pub fast_pace_premium: f64,
    pub very_fast_pace_premium: f64,

    /// Goalkeepers taller than this (inches) get the height premium
    pub tall_keeper_inches: f64,
    /// Goalkeepers shorter than this (inches) get the height penalty
    pub short_keeper_inches: f64,
    pub keeper_height_rate: f64,
}

/// Progression ladder, evaluated top-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Trailing window in age-years
    pub window_years: i32,

    /// (minimum overall gain, premium), highest gain first
    pub tiers: Vec<(i32, f64)>,

    /// Applied when overall did not move at all
    pub zero_progression_penalty: f64,

    /// Applied for gains at or below `minimal_progression_max`
    pub minimal_progression_max: i32,
    pub minimal_progression_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub high_min_listings: usize,
    pub medium_min_listings: usize,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            base: BaseValueConfig::default(),
            adjustments: AdjustmentConfig::default(),
            progression: ProgressionConfig::default(),
            confidence: ConfidenceConfig::default(),
        }
    }
}

impl Default for BaseValueConfig {
    fn default() -> Self {
        Self {
            outlier_multiple: 3.0,
            listing_discount: 0.20,
            max_recent_sales: 3,
            recency_horizon_days: 365.0,
            similarity_gap: 10.0,
            min_sale_weight: 0.1,
        }
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            age_rate_per_year: 0.02,
            overall_rate_per_point: 0.03,
            playable_position_margin: 6,
            two_position_premium: 0.10,
            multi_position_premium: 0.15,
            retirement_penalties: [-0.65, -0.45, -0.30],
            newly_minted_max_matches: 10,
            newly_minted_premium: 0.10,
            slow_overall_threshold: 60,
            slow_pace_threshold: 50,
            slow_pace_penalty: -0.10,
            fast_pace_threshold: 85,
            very_fast_pace_threshold: 90,
            fast_pace_premium: 0.05,
            very_fast_pace_premium: 0.10,
            tall_keeper_inches: 74.0,  // 6'2"
            short_keeper_inches: 69.0, // 5'9"
            keeper_height_rate: 0.05,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            window_years: 10,
            tiers: vec![(20, 0.25), (16, 0.20), (12, 0.15), (8, 0.10), (5, 0.05)],
            zero_progression_penalty: -0.15,
            minimal_progression_max: 1,
            minimal_progression_penalty: -0.05,
        }
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self { high_min_listings: 25, medium_min_listings: 10 }
    }
}

impl ValuationConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ValuationConfig =
            toml::from_str(&content).map_err(|e| ValuationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ValuationError::Config(e.to_string()))
    }

    /// Defaults with `MV_*` environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse("MV_OUTLIER_MULTIPLE")? {
            config.base.outlier_multiple = v;
        }
        if let Some(v) = env_parse("MV_LISTING_DISCOUNT")? {
            config.base.listing_discount = v;
        }
        if let Some(v) = env_parse("MV_MAX_RECENT_SALES")? {
            config.base.max_recent_sales = v;
        }
        if let Some(v) = env_parse("MV_RECENCY_HORIZON_DAYS")? {
            config.base.recency_horizon_days = v;
        }
        if let Some(v) = env_parse("MV_AGE_RATE")? {
            config.adjustments.age_rate_per_year = v;
        }
        if let Some(v) = env_parse("MV_OVERALL_RATE")? {
            config.adjustments.overall_rate_per_point = v;
        }
        if let Some(v) = env_parse("MV_PROGRESSION_WINDOW_YEARS")? {
            config.progression.window_years = v;
        }
        if let Some(v) = env_parse("MV_HIGH_CONFIDENCE_LISTINGS")? {
            config.confidence.high_min_listings = v;
        }
        if let Some(v) = env_parse("MV_MEDIUM_CONFIDENCE_LISTINGS")? {
            config.confidence.medium_min_listings = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject coefficient combinations the calculator cannot work with
    pub fn validate(&self) -> Result<()> {
        let base = &self.base;
        if base.outlier_multiple <= 0.0 {
            return Err(ValuationError::Config("outlier_multiple must be positive".into()));
        }
        if !(0.0..1.0).contains(&base.listing_discount) {
            return Err(ValuationError::Config("listing_discount must be in [0, 1)".into()));
        }
        if base.recency_horizon_days <= 0.0 || base.similarity_gap <= 0.0 {
            return Err(ValuationError::Config(
                "recency_horizon_days and similarity_gap must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&base.min_sale_weight) {
            return Err(ValuationError::Config("min_sale_weight must be in [0, 1]".into()));
        }
        if self.confidence.medium_min_listings > self.confidence.high_min_listings {
            return Err(ValuationError::Config(
                "medium confidence threshold exceeds high threshold".into(),
            ));
        }
        if self.progression.window_years < 0 {
            return Err(ValuationError::Config("window_years must not be negative".into()));
        }
        if self.progression.tiers.windows(2).any(|w| w[0].0 <= w[1].0) {
            return Err(ValuationError::Config(
                "progression tiers must be ordered by descending gain".into(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ValuationError::Config(format!("{key} has invalid value '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ValuationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base.max_recent_sales, 3);
        assert_eq!(config.confidence.high_min_listings, 25);
        assert_eq!(config.adjustments.retirement_penalties, [-0.65, -0.45, -0.30]);
    }

    #[test]
    fn test_toml_round_trip_with_partial_file() {
        let config: ValuationConfig = toml::from_str(
            r#"
            [base]
            listing_discount = 0.25

            [confidence]
            high_min_listings = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.base.listing_discount, 0.25);
        assert_eq!(config.base.outlier_multiple, 3.0);
        assert_eq!(config.confidence.high_min_listings, 40);
        assert_eq!(config.confidence.medium_min_listings, 10);

        let rendered = config.to_toml().unwrap();
        let parsed: ValuationConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valuation.toml");
        std::fs::write(&path, "[adjustments]\nage_rate_per_year = 0.01\n").unwrap();

        let config = ValuationConfig::from_file(&path).unwrap();
        assert_eq!(config.adjustments.age_rate_per_year, 0.01);

        std::fs::write(&path, "[confidence]\nmedium_min_listings = 50\n").unwrap();
        assert!(matches!(ValuationConfig::from_file(&path), Err(ValuationError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ValuationConfig::default();
        config.base.listing_discount = 1.5;
        assert!(config.validate().is_err());

        let mut config = ValuationConfig::default();
        config.progression.tiers = vec![(5, 0.05), (20, 0.25)];
        assert!(config.validate().is_err());
    }
}
