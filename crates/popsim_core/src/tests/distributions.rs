//! Tests for the leaf sampling distributions
//!
//! These tests verify:
//! - Construction-time rejection of malformed configurations
//! - Sampled values staying inside their structural bounds
//! - Sample moments landing near the configured targets

use jiff::civil::date;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::distribution::{
    AgeDistribution, LifeExpectancy, PopulationDistribution, SalaryDistribution,
};
use crate::error::ConfigError;
use crate::model::Gender;

const KNOTS: [f64; 5] = [0.0, 30.0, 60.0, 70.0, 110.0];
const WEIGHTS: [f64; 5] = [2.0, 2.5, 1.5, 1.0, 0.0];

/// Test malformed age densities are rejected at construction
#[test]
fn test_age_density_rejects_malformed_configuration() {
    assert!(matches!(
        AgeDistribution::new(&[0.0], &[1.0]),
        Err(ConfigError::TooFewAgeKnots(1))
    ));
    assert!(matches!(
        AgeDistribution::new(&[0.0, 50.0, 40.0], &[1.0, 1.0, 1.0]),
        Err(ConfigError::NonMonotonicAgeKnots { .. })
    ));
    assert!(matches!(
        AgeDistribution::new(&KNOTS, &[1.0, 1.0]),
        Err(ConfigError::KnotWeightMismatch {
            knots: 5,
            weights: 2
        })
    ));
    assert!(matches!(
        AgeDistribution::new(&[0.0, 50.0], &[1.0, -1.0]),
        Err(ConfigError::NegativeWeight { index: 1 })
    ));
    assert!(matches!(
        AgeDistribution::new(&[0.0, 50.0], &[0.0, 0.0]),
        Err(ConfigError::ZeroTotalWeight)
    ));
}

/// Test sampled ages stay inside the knot range
#[test]
fn test_age_density_samples_within_range() {
    let ages = AgeDistribution::new(&KNOTS, &WEIGHTS).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..10_000 {
        let age = ages.sample(&mut rng);
        assert!(
            (0.0..=110.0).contains(&age),
            "sampled age {age} outside knot range"
        );
    }
}

/// Test the gender mix converges to the configured male fraction
#[test]
fn test_population_distribution_gender_mix() {
    let population = PopulationDistribution::new(&KNOTS, &WEIGHTS, 0.4).unwrap();
    let today = date(1991, 9, 1);
    let mut rng = SmallRng::seed_from_u64(11);

    let n = 10_000;
    let mut males = 0usize;
    for _ in 0..n {
        let (birth_date, gender) = population.sample(&mut rng, today).unwrap();
        assert!(birth_date <= today, "cohort member born in the future");
        if gender == Gender::Male {
            males += 1;
        }
    }
    let fraction = males as f64 / n as f64;
    assert!(
        (fraction - 0.4).abs() < 0.03,
        "male fraction {fraction} too far from 0.4"
    );
}

/// Test the male fraction is validated
#[test]
fn test_population_distribution_rejects_bad_male_fraction() {
    assert!(matches!(
        PopulationDistribution::new(&KNOTS, &WEIGHTS, 1.2),
        Err(ConfigError::MaleFractionOutOfRange(_))
    ));
    assert!(PopulationDistribution::new(&KNOTS, &WEIGHTS, -0.1).is_err());
}

/// Test salary samples are positive and average near the configured mean
#[test]
fn test_salary_moments_match_target() {
    let salaries = SalaryDistribution::new(1000.0, 400.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(17);

    let n = 20_000;
    let mut total = 0i64;
    for _ in 0..n {
        let salary = salaries.sample(&mut rng);
        assert!(salary >= 0, "log-normal salary sampled negative: {salary}");
        total += salary;
    }
    let mean = total as f64 / n as f64;
    assert!(
        (mean - 1000.0).abs() < 25.0,
        "sample mean {mean} too far from 1000"
    );
}

/// Test salary parameter validation
#[test]
fn test_salary_rejects_bad_parameters() {
    assert!(SalaryDistribution::new(-100.0, 400.0).is_err());
    assert!(SalaryDistribution::new(1000.0, 0.0).is_err());
    assert!(SalaryDistribution::new(0.0, 400.0).is_err());
}

/// Test the age-at-death floor: samples are never negative even when the
/// normal tail goes below zero
#[test]
fn test_life_expectancy_clamps_at_zero() {
    // Mean 0 puts roughly half the normal mass below zero
    let life = LifeExpectancy::new(0.0, 0.0).unwrap();
    let birth = date(2000, 1, 1);
    let mut rng = SmallRng::seed_from_u64(5);

    for _ in 0..1_000 {
        let age = life.sample_age(&mut rng, Gender::Male);
        assert!(age >= 0.0, "sampled age at death is negative: {age}");
        let death = life.death_date(&mut rng, birth, Gender::Female).unwrap();
        assert!(death >= birth, "death date {death} precedes birth {birth}");
    }
}
