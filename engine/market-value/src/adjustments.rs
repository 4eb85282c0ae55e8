//! Individual premiums and penalties.
//!
//! Each function returns an unrounded dollar amount computed against the
//! same base value; the calculator rounds and sums them.

use crate::base::ComparableBase;
use crate::config::{AdjustmentConfig, ProgressionConfig};
use crate::height::Height;
use crate::models::{PlayerMetadata, ProgressionPoint};
use position_ratings::Position;
use std::collections::BTreeMap;

/// Age difference to the comparables, signed
pub fn age_adjustment(
    player: &PlayerMetadata,
    comparables: Option<&ComparableBase>,
    base: f64,
    config: &AdjustmentConfig,
) -> f64 {
    match comparables {
        Some(comps) => (player.age as f64 - comps.average_age) * config.age_rate_per_year * base,
        None => 0.0,
    }
}

/// Overall difference to the comparables, signed
pub fn overall_adjustment(
    player: &PlayerMetadata,
    comparables: Option<&ComparableBase>,
    base: f64,
    config: &AdjustmentConfig,
) -> f64 {
    match comparables {
        Some(comps) => {
            (player.overall as f64 - comps.average_overall) * config.overall_rate_per_point * base
        }
        None => 0.0,
    }
}

/// Number of positions the player can realistically fill.
///
/// With computed ratings, a position counts when its nonzero OVR is within
/// the margin of the player's overall. Without them, every listed position
/// counts.
pub fn playable_positions(
    player: &PlayerMetadata,
    ratings: Option<&BTreeMap<Position, u8>>,
    config: &AdjustmentConfig,
) -> usize {
    match ratings {
        Some(ratings) => ratings
            .values()
            .filter(|&&ovr| {
                ovr > 0 && (player.overall - ovr as i32).abs() <= config.playable_position_margin
            })
            .count(),
        None => player.positions.len(),
    }
}

pub fn position_premium(playable: usize, base: f64, config: &AdjustmentConfig) -> f64 {
    match playable {
        0 | 1 => 0.0,
        2 => base * config.two_position_premium,
        _ => base * config.multi_position_premium,
    }
}

/// Overall gain across the trailing window, oldest to newest snapshot.
///
/// `None` when fewer than two snapshots fall inside the window.
pub fn progression_delta(
    player_age: i32,
    history: &[ProgressionPoint],
    config: &ProgressionConfig,
) -> Option<i32> {
    let earliest_age = player_age - config.window_years;
    let window: Vec<&ProgressionPoint> =
        history.iter().filter(|p| p.age >= earliest_age && p.age <= player_age).collect();

    match (window.first(), window.last()) {
        (Some(oldest), Some(newest)) if window.len() >= 2 => Some(newest.overall - oldest.overall),
        _ => None,
    }
}

/// Fraction of base for an overall gain.
///
/// Zero gain is matched before the minimal-gain band so that a flat
/// player takes the heavier penalty.
pub fn progression_rate(delta: i32, config: &ProgressionConfig) -> f64 {
    if let Some((_, rate)) = config.tiers.iter().find(|(min_gain, _)| delta >= *min_gain) {
        return *rate;
    }
    if delta == 0 {
        config.zero_progression_penalty
    } else if delta <= config.minimal_progression_max {
        config.minimal_progression_penalty
    } else {
        0.0
    }
}

pub fn progression_premium(
    player: &PlayerMetadata,
    history: &[ProgressionPoint],
    retirement_years: Option<u32>,
    base: f64,
    config: &ProgressionConfig,
) -> f64 {
    if retirement_years.unwrap_or(0) > 0 {
        return 0.0;
    }
    match progression_delta(player.age, history, config) {
        Some(delta) => base * progression_rate(delta, config),
        None => 0.0,
    }
}

pub fn retirement_penalty(retirement_years: Option<u32>, base: f64, config: &AdjustmentConfig) -> f64 {
    match retirement_years {
        Some(years @ 1..=3) => base * config.retirement_penalties[years as usize - 1],
        _ => 0.0,
    }
}

pub fn newly_minted_premium(match_count: Option<u32>, base: f64, config: &AdjustmentConfig) -> f64 {
    match match_count {
        Some(count) if count < config.newly_minted_max_matches => base * config.newly_minted_premium,
        _ => 0.0,
    }
}

/// Slow outfield players with a decent overall
pub fn pace_penalty(player: &PlayerMetadata, base: f64, config: &AdjustmentConfig) -> f64 {
    if player.overall > config.slow_overall_threshold
        && player.pace < config.slow_pace_threshold
        && !player.is_goalkeeper()
    {
        base * config.slow_pace_penalty
    } else {
        0.0
    }
}

/// Fast players outside wide roles
pub fn pace_premium(player: &PlayerMetadata, base: f64, config: &AdjustmentConfig) -> f64 {
    let wide = player.primary_position().is_some_and(Position::is_wide);
    if wide || player.pace < config.fast_pace_threshold {
        return 0.0;
    }
    if player.pace >= config.very_fast_pace_threshold {
        base * config.very_fast_pace_premium
    } else {
        base * config.fast_pace_premium
    }
}

/// Goalkeeper height premium or penalty.
///
/// The premium is rounded up and never below one dollar; the penalty is
/// left unrounded.
pub fn height_adjustment(player: &PlayerMetadata, base: f64, config: &AdjustmentConfig) -> f64 {
    if !player.is_goalkeeper() || player.height == 0 {
        return 0.0;
    }
    let inches = Height::from_cm(player.height).total_inches();
    if inches > config.tall_keeper_inches {
        let premium = base * config.keeper_height_rate;
        if premium > 0.0 {
            premium.ceil().max(1.0)
        } else {
            0.0
        }
    } else if inches < config.short_keeper_inches {
        -(base * config.keeper_height_rate)
    } else {
        0.0
    }
}
