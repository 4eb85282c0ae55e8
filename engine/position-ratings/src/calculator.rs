use crate::error::{RatingError, Result};
use crate::familiarity;
use crate::types::*;
use crate::weights::AttributeWeights;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Default length of a best-positions list
pub const DEFAULT_BEST_POSITIONS: usize = 5;

/// Rule-based position rating calculator.
///
/// Stateless; the weight table and familiarity matrix are static data.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingCalculator;

impl RatingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Check attributes are within 0-99 and positions are present
    pub fn validate(&self, player: &PlayerForRating) -> Result<()> {
        for (attribute, value) in player.attributes.named() {
            if !(0..=99).contains(&value) {
                return Err(RatingError::AttributeOutOfRange { attribute, value });
            }
        }
        if player.positions.is_empty() {
            return Err(RatingError::NoPositions);
        }
        Ok(())
    }

    /// Penalty and tag for playing `target` given the player's listed positions
    pub fn familiarity(&self, positions: &[Position], target: Position) -> Result<(i32, Familiarity)> {
        let primary = *positions.first().ok_or(RatingError::NoPositions)?;

        if target == primary {
            return Ok((0, Familiarity::Primary));
        }
        if positions.contains(&target) {
            return Ok((-1, Familiarity::Secondary));
        }

        let tier = familiarity::tier(primary, target);
        Ok((familiarity::penalty_for_tier(tier), familiarity::tag_for_tier(tier)))
    }

    /// Rate a player at one position, propagating validation errors
    pub fn try_rate_position(
        &self,
        player: &PlayerForRating,
        target: Position,
    ) -> Result<PositionRatingResult> {
        self.validate(player)?;

        let (penalty, familiarity) = self.familiarity(&player.positions, target)?;
        let weighted_average =
            AttributeWeights::for_position(target).weighted_average(&player.attributes);

        let ovr = (weighted_average + penalty as f64).round().clamp(0.0, 99.0) as u8;

        Ok(PositionRatingResult {
            success: true,
            position: target,
            ovr,
            weighted_average,
            penalty,
            familiarity,
            error: None,
        })
    }

    /// Rate a player at one position.
    ///
    /// Malformed player data produces a result with `success == false`
    /// instead of an error.
    pub fn rate_position(&self, player: &PlayerForRating, target: Position) -> PositionRatingResult {
        match self.try_rate_position(player, target) {
            Ok(result) => result,
            Err(e) => {
                debug!("Rating player {} at {} failed: {}", player.id, target, e);
                PositionRatingResult::failed(target, &e)
            }
        }
    }

    /// Rate a player at every position
    pub fn rate_all_positions(&self, player: &PlayerForRating) -> AllPositionRatings {
        if let Err(e) = self.validate(player) {
            warn!("Invalid player {} ({}): {}", player.id, player.name, e);
            let results =
                Position::ALL.iter().map(|&p| (p, PositionRatingResult::failed(p, &e))).collect();
            return AllPositionRatings {
                success: false,
                player_id: player.id,
                player_name: player.name.clone(),
                results,
                error: Some((&e).into()),
            };
        }

        let results: BTreeMap<Position, PositionRatingResult> =
            Position::ALL.iter().map(|&p| (p, self.rate_position(player, p))).collect();

        debug!("Rated player {} at {} positions", player.id, results.len());

        AllPositionRatings {
            success: true,
            player_id: player.id,
            player_name: player.name.clone(),
            results,
            error: None,
        }
    }

    /// Highest-rated positions, best first.
    ///
    /// Ties keep table order (`Position::ALL`).
    pub fn best_positions(&self, player: &PlayerForRating, limit: usize) -> Vec<RankedPosition> {
        let all = self.rate_all_positions(player);
        if !all.success {
            return Vec::new();
        }

        let mut ranked: Vec<RankedPosition> = all
            .results
            .values()
            .filter(|r| r.success && r.ovr > 0)
            .map(|r| RankedPosition { position: r.position, ovr: r.ovr })
            .collect();
        ranked.sort_by(|a, b| b.ovr.cmp(&a.ovr));
        ranked.truncate(limit);
        ranked
    }

    /// Unrounded weighted average at the primary position.
    ///
    /// Falls back to the plain attribute mean when the player is invalid.
    pub fn precise_overall(&self, player: &PlayerForRating) -> f64 {
        match player.primary_position() {
            Some(primary) => match self.try_rate_position(player, primary) {
                Ok(result) => result.weighted_average,
                Err(_) => player.attributes.mean(),
            },
            None => player.attributes.mean(),
        }
    }
}
