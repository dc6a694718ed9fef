use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

// =============================================================
// parse_expr
// =============================================================

#[test]
fn parses_count_and_sides() {
    let spec = parse_expr("2d6").unwrap();
    assert_eq!(spec.count, 2);
    assert_eq!(spec.sides, 6);
    assert_eq!(spec.expr, "2d6");
}

#[test]
fn missing_count_defaults_to_one() {
    let spec = parse_expr("d20").unwrap();
    assert_eq!(spec.count, 1);
    assert_eq!(spec.sides, 20);
}

#[test]
fn unparseable_count_defaults_to_one() {
    assert_eq!(parse_expr("xd6").unwrap().count, 1);
    assert_eq!(parse_expr("-3d6").unwrap().count, 1);
}

#[test]
fn zero_count_rolls_one_die() {
    assert_eq!(parse_expr("0d6").unwrap().count, 1);
}

#[test]
fn missing_d_is_malformed() {
    assert_eq!(parse_expr("26").unwrap_err(), DiceError::Malformed("26".to_owned()));
}

#[test]
fn extra_d_is_malformed() {
    assert!(matches!(parse_expr("2d6d8"), Err(DiceError::Malformed(_))));
}

#[test]
fn empty_expression_is_malformed() {
    assert!(matches!(parse_expr(""), Err(DiceError::Malformed(_))));
}

#[test]
fn missing_sides_is_invalid() {
    assert_eq!(parse_expr("2d").unwrap_err(), DiceError::InvalidSides("2d".to_owned()));
}

#[test]
fn non_numeric_sides_are_invalid() {
    assert!(matches!(parse_expr("2dsei"), Err(DiceError::InvalidSides(_))));
}

#[test]
fn zero_sides_are_invalid() {
    assert!(matches!(parse_expr("2d0"), Err(DiceError::InvalidSides(_))));
}

// =============================================================
// roll
// =============================================================

#[test]
fn roll_produces_one_result_per_die() {
    let spec = parse_expr("4d6").unwrap();
    let outcome = roll(&spec, &mut rng());
    assert_eq!(outcome.rolls.len(), 4);
}

#[test]
fn roll_results_stay_in_range() {
    let spec = parse_expr("100d6").unwrap();
    let outcome = roll(&spec, &mut rng());
    assert!(outcome.rolls.iter().all(|&r| (1..=6).contains(&r)));
}

#[test]
fn total_is_the_sum_of_results() {
    let spec = parse_expr("5d8").unwrap();
    let outcome = roll(&spec, &mut rng());
    let sum: i64 = outcome.rolls.iter().map(|&r| i64::from(r)).sum();
    assert_eq!(outcome.total, sum);
}

#[test]
fn single_sided_die_always_rolls_one() {
    let spec = parse_expr("3d1").unwrap();
    let outcome = roll(&spec, &mut rng());
    assert_eq!(outcome.rolls, [1, 1, 1]);
    assert_eq!(outcome.total, 3);
}

#[test]
fn same_seed_same_outcome() {
    let spec = parse_expr("2d6").unwrap();
    let a = roll(&spec, &mut StdRng::seed_from_u64(11));
    let b = roll(&spec, &mut StdRng::seed_from_u64(11));
    assert_eq!(a, b);
}

// =============================================================
// details
// =============================================================

#[test]
fn details_lists_results_in_parens() {
    let outcome =
        RollOutcome { expr: "3d6".to_owned(), rolls: vec![4, 1, 6], total: 11 };
    assert_eq!(outcome.details(), "(4,1,6)");
}

#[test]
fn details_for_a_single_die() {
    let outcome = RollOutcome { expr: "d20".to_owned(), rolls: vec![17], total: 17 };
    assert_eq!(outcome.details(), "(17)");
}
