//! End-to-end valuation scenarios and properties

use crate::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use position_ratings::Position;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn player() -> PlayerMetadata {
    PlayerMetadata {
        id: 116267,
        first_name: "Market".into(),
        last_name: "Tester".into(),
        overall: 80,
        age: 25,
        height: 180,
        positions: vec![Position::CB],
        retirement_years: None,
        pace: 75,
        shooting: 40,
        passing: 65,
        dribbling: 60,
        defense: 84,
        physical: 80,
        goalkeeping: 0,
    }
}

fn listing(price: f64) -> ComparableListing {
    ComparableListing {
        listing_id: format!("listing-{price}"),
        price,
        overall: 80,
        age: 25,
        positions: vec![Position::CB],
    }
}

fn point(age: i32, overall: i32) -> ProgressionPoint {
    ProgressionPoint {
        date: now() - Duration::days(365 * (25 - age) as i64),
        age,
        overall,
        pace: 75,
        shooting: 40,
        passing: 65,
        dribbling: 60,
        defense: overall,
        physical: 80,
    }
}

/// Inputs whose base value is exactly $100
fn hundred_dollar_inputs(player: PlayerMetadata) -> ValuationInputs {
    let mut inputs = ValuationInputs::for_player(player);
    inputs.comparable_listings = vec![listing(125.0)];
    inputs
}

fn estimate(inputs: &ValuationInputs) -> MarketValueEstimate {
    estimate_value(inputs, now()).unwrap()
}

#[test]
fn test_no_market_data_is_unknown() {
    let result = estimate(&ValuationInputs::for_player(player()));

    assert_eq!(result.details.base_value, 0);
    assert_eq!(result.estimated_value, 0);
    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.breakdown, ValueBreakdown::default());
    assert!(result.is_unknown());
    assert_eq!(result.display_value(), "Unknown");
}

#[test]
fn test_single_listing_matching_player() {
    let mut inputs = ValuationInputs::for_player(player());
    inputs.comparable_listings = vec![listing(300.0)];
    let result = estimate(&inputs);

    assert_eq!(result.details.base_value, 240);
    assert_eq!(result.details.comparable_average, 240);
    assert_eq!(result.breakdown.age_adjustment, 0);
    assert_eq!(result.breakdown.overall_adjustment, 0);
    assert_eq!(result.estimated_value, 240);
    assert_eq!(result.display_value(), "$240");
}

#[test]
fn test_listings_and_sales_are_averaged() {
    let mut inputs = hundred_dollar_inputs(player());
    inputs.recent_sales = vec![SaleRecord { price: 120.0, purchased_at: now(), overall: Some(80) }];
    let result = estimate(&inputs);

    assert_eq!(result.details.comparable_average, 100);
    assert_eq!(result.details.recent_sales_average, 120);
    assert_eq!(result.details.base_value, 110);
    assert_eq!(result.breakdown.recent_sales, 1);
    assert_eq!(result.estimated_value, 110);
}

#[test]
fn test_sales_only_base() {
    let mut inputs = ValuationInputs::for_player(player());
    inputs.recent_sales = vec![
        SaleRecord { price: 90.0, purchased_at: now() - Duration::days(1), overall: None },
        SaleRecord { price: 90.0, purchased_at: now() - Duration::days(2), overall: None },
    ];
    let result = estimate(&inputs);

    assert_eq!(result.details.base_value, 90);
    assert_eq!(result.confidence, Confidence::Low);
    assert!(!result.is_unknown());
}

#[test]
fn test_age_and_overall_against_comparables() {
    let mut older = player();
    older.age = 27;
    older.overall = 78;
    let result = estimate(&hundred_dollar_inputs(older));

    // two years older: +4%, two points lower: -6%
    assert_eq!(result.breakdown.age_adjustment, 4);
    assert_eq!(result.breakdown.overall_adjustment, -6);
    assert_eq!(result.estimated_value, 98);
}

#[test]
fn test_position_premium_uses_supplied_ratings() {
    let mut inputs = hundred_dollar_inputs(player());

    inputs.position_ratings = Some(BTreeMap::from([(Position::CB, 80), (Position::CDM, 74)]));
    assert_eq!(estimate(&inputs).breakdown.position_premium, 10);

    inputs.position_ratings = Some(BTreeMap::from([(Position::CB, 80), (Position::CDM, 73)]));
    assert_eq!(estimate(&inputs).breakdown.position_premium, 0);

    inputs.position_ratings = Some(BTreeMap::from([
        (Position::CB, 80),
        (Position::LB, 76),
        (Position::RB, 76),
    ]));
    assert_eq!(estimate(&inputs).breakdown.position_premium, 15);
}

#[test]
fn test_position_premium_fallback_counts_listed_positions() {
    let mut versatile = player();
    versatile.positions = vec![Position::CB, Position::LB];
    let mut inputs = hundred_dollar_inputs(versatile);

    assert_eq!(estimate(&inputs).breakdown.position_premium, 10);

    // a supplied but empty mapping is not the fallback
    inputs.position_ratings = Some(BTreeMap::new());
    assert_eq!(estimate(&inputs).breakdown.position_premium, 0);
}

#[test]
fn test_progression_premium_and_retirement() {
    let mut inputs = hundred_dollar_inputs(player());
    inputs.progression = vec![point(15, 58), point(20, 70), point(25, 80)];

    let result = estimate(&inputs);
    assert_eq!(result.breakdown.progression_premium, 25);
    assert_eq!(result.estimated_value, 125);

    inputs.retirement_years = Some(2);
    let result = estimate(&inputs);
    assert_eq!(result.breakdown.progression_premium, 0);
    assert_eq!(result.breakdown.retirement_penalty, -45);
    assert_eq!(result.estimated_value, 55);
}

#[test]
fn test_retirement_years_from_metadata() {
    let mut retiring = player();
    retiring.retirement_years = Some(1);
    let mut inputs = hundred_dollar_inputs(retiring);
    assert_eq!(estimate(&inputs).breakdown.retirement_penalty, -65);

    inputs.retirement_years = Some(3);
    assert_eq!(estimate(&inputs).breakdown.retirement_penalty, -30);
}

#[test]
fn test_flat_progression_takes_the_zero_penalty() {
    let mut inputs = hundred_dollar_inputs(player());
    inputs.progression = vec![point(20, 80), point(25, 80)];
    assert_eq!(estimate(&inputs).breakdown.progression_premium, -15);

    inputs.progression = vec![point(20, 79), point(25, 80)];
    assert_eq!(estimate(&inputs).breakdown.progression_premium, -5);

    inputs.progression = vec![point(25, 80)];
    assert_eq!(estimate(&inputs).breakdown.progression_premium, 0);
}

#[test]
fn test_newly_minted_premium() {
    let mut inputs = hundred_dollar_inputs(player());
    inputs.match_count = Some(3);
    assert_eq!(estimate(&inputs).breakdown.newly_mint_premium, 10);

    inputs.match_count = Some(40);
    assert_eq!(estimate(&inputs).breakdown.newly_mint_premium, 0);
}

#[test]
fn test_pace_penalty_and_premium() {
    let mut slow = player();
    slow.pace = 45;
    let mut inputs = hundred_dollar_inputs(slow.clone());
    inputs.comparable_listings[0].overall = slow.overall;
    assert_eq!(estimate(&inputs).breakdown.pace_penalty, -10);

    let mut fast = player();
    fast.positions = vec![Position::CM];
    fast.pace = 92;
    assert_eq!(estimate(&hundred_dollar_inputs(fast.clone())).breakdown.pace_premium, 10);

    fast.pace = 87;
    assert_eq!(estimate(&hundred_dollar_inputs(fast.clone())).breakdown.pace_premium, 5);

    fast.positions = vec![Position::RW];
    assert_eq!(estimate(&hundred_dollar_inputs(fast)).breakdown.pace_premium, 0);
}

#[test]
fn test_goalkeeper_height() {
    let mut keeper = player();
    keeper.positions = vec![Position::GK];
    keeper.pace = 50;
    keeper.height = 193;
    assert_eq!(estimate(&hundred_dollar_inputs(keeper.clone())).breakdown.height_adjustment, 5);

    keeper.height = 172;
    let result = estimate(&hundred_dollar_inputs(keeper));
    assert_eq!(result.breakdown.height_adjustment, -5);
    assert_eq!(result.estimated_value, 95);
}

#[test]
fn test_sub_dollar_adjustment_keeps_a_dollar() {
    let mut older = player();
    older.age = 26;
    let mut inputs = ValuationInputs::for_player(older);
    inputs.comparable_listings = vec![listing(12.5)];

    // 1 year * 2% * $10 = $0.20
    let result = estimate(&inputs);
    assert_eq!(result.breakdown.age_adjustment, 1);
    assert_eq!(result.estimated_value, 11);
}

#[test]
fn test_value_is_floored_at_zero() {
    let mut weak = player();
    weak.overall = 70;
    weak.retirement_years = Some(1);
    let mut inputs = hundred_dollar_inputs(weak);
    inputs.comparable_listings[0].overall = 90;

    let result = estimate(&inputs);
    assert_eq!(result.breakdown.total_adjustments, -125);
    assert_eq!(result.estimated_value, 0);
    assert!(!result.is_unknown());
}

#[test]
fn test_confidence_counts_only_listings() {
    let mut inputs = ValuationInputs::for_player(player());
    inputs.recent_sales = (0..3)
        .map(|d| SaleRecord { price: 100.0, purchased_at: now() - Duration::days(d), overall: None })
        .collect();

    for (count, expected) in [
        (0, Confidence::Low),
        (9, Confidence::Low),
        (10, Confidence::Medium),
        (24, Confidence::Medium),
        (25, Confidence::High),
    ] {
        inputs.comparable_listings = vec![listing(100.0); count];
        assert_eq!(estimate(&inputs).confidence, expected, "{count} listings");
    }
}

#[test]
fn test_unusable_sales_do_not_set_the_base() {
    let mut inputs = hundred_dollar_inputs(player());
    inputs.recent_sales = vec![SaleRecord { price: -500.0, purchased_at: now(), overall: Some(80) }];
    let result = estimate(&inputs);
    assert_eq!(result.breakdown.recent_sales, 0);
    assert_eq!(result.details.recent_sales_average, 0);
    assert_eq!(result.details.base_value, 100);
    assert_eq!(result.estimated_value, 100);

    let mut inputs = ValuationInputs::for_player(player());
    inputs.recent_sales = vec![
        SaleRecord { price: f64::NAN, purchased_at: now(), overall: None },
        SaleRecord { price: 0.0, purchased_at: now() - Duration::days(1), overall: None },
    ];
    let result = estimate(&inputs);
    assert_eq!(result.breakdown.recent_sales, 0);
    assert_eq!(result.details.base_value, 0);
    assert_eq!(result.confidence, Confidence::Low);
    assert!(result.is_unknown());
    assert_eq!(result.display_value(), "Unknown");
}

#[test]
fn test_confidence_uses_listings_left_after_outliers() {
    let mut inputs = ValuationInputs::for_player(player());
    inputs.comparable_listings = vec![listing(100.0); 24];
    inputs.comparable_listings.push(listing(1000.0));

    let result = estimate(&inputs);
    assert_eq!(result.breakdown.comparable_listings, 24);
    assert_eq!(result.details.comparable_listings.len(), 24);
    assert_eq!(result.details.comparable_average, 80);
    assert_eq!(result.confidence, Confidence::Medium);
}

#[test]
fn test_custom_config_changes_discount() {
    let mut config = ValuationConfig::default();
    config.base.listing_discount = 0.5;
    let calculator = MarketValueCalculator::new(config);

    let mut inputs = ValuationInputs::for_player(player());
    inputs.comparable_listings = vec![listing(300.0)];
    assert_eq!(calculator.estimate(&inputs, now()).unwrap().estimated_value, 150);
}

#[test]
fn test_estimate_serializes_camel_case() {
    let result = estimate(&hundred_dollar_inputs(player()));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["estimatedValue"], 100);
    assert_eq!(json["confidence"], "low");
    assert_eq!(json["breakdown"]["newlyMintPremium"], 0);
    assert_eq!(json["details"]["baseValue"], 100);
}

fn market() -> impl Strategy<Value = ValuationInputs> {
    (
        40..=99i32,
        18..=38i32,
        0..=99i32,
        proptest::collection::vec((1.0..5000.0f64, 18..=38i32, 40..=99i32), 0..30),
        proptest::collection::vec((1.0..5000.0f64, 0..800i64, proptest::option::of(40..=99i32)), 0..5),
        proptest::option::of(0..=6u32),
        proptest::option::of(0..=30u32),
    )
        .prop_map(|(overall, age, pace, listings, sales, retirement_years, match_count)| {
            let mut p = player();
            p.overall = overall;
            p.age = age;
            p.pace = pace;
            ValuationInputs {
                player: Some(p),
                comparable_listings: listings
                    .into_iter()
                    .map(|(price, age, overall)| ComparableListing {
                        listing_id: String::new(),
                        price,
                        overall,
                        age,
                        positions: vec![Position::CB],
                    })
                    .collect(),
                recent_sales: sales
                    .into_iter()
                    .map(|(price, days, overall)| SaleRecord {
                        price,
                        purchased_at: now() - Duration::days(days),
                        overall,
                    })
                    .collect(),
                progression: vec![point(age - 4, overall - 6), point(age, overall)],
                position_ratings: None,
                retirement_years,
                match_count,
            }
        })
}

proptest! {
    #[test]
    fn total_is_sum_of_adjustments(inputs in market()) {
        let result = estimate(&inputs);
        let sum: i64 = result.breakdown.adjustments().iter().map(|(_, v)| v).sum();
        prop_assert_eq!(result.breakdown.total_adjustments, sum);
    }

    #[test]
    fn value_is_floored_base_plus_adjustments(inputs in market()) {
        let result = estimate(&inputs);
        let expected = (result.details.base_value + result.breakdown.total_adjustments).max(0);
        prop_assert_eq!(result.estimated_value as i64, expected);
    }

    #[test]
    fn estimate_is_deterministic(inputs in market()) {
        prop_assert_eq!(estimate(&inputs), estimate(&inputs));
    }

    #[test]
    fn counts_stay_within_inputs(inputs in market()) {
        let result = estimate(&inputs);
        prop_assert!(result.breakdown.comparable_listings <= inputs.comparable_listings.len());
        prop_assert!(result.breakdown.recent_sales <= 3);
        prop_assert_eq!(result.breakdown.comparable_listings, result.details.comparable_listings.len());
    }

    #[test]
    fn retiring_players_get_no_progression(inputs in market()) {
        let result = estimate(&inputs);
        if inputs.retirement_years.unwrap_or(0) > 0 {
            prop_assert_eq!(result.breakdown.progression_premium, 0);
        }
    }
}
