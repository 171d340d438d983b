//! Simulation configuration.
//!
//! `SimulationConfig` contains everything needed to run a simulation. The
//! `Default` values are illustrative rather than calibrated against real
//! demographic data; scenario files only need to name the fields they
//! change.

use jiff::civil::{Date, date};
use serde::{Deserialize, Serialize};

use crate::model::Gender;

/// Complete simulation configuration.
///
/// Distribution parameters are validated when the simulation state is
/// constructed; a malformed configuration (non-increasing age knots,
/// negative spreads, an empty date range) is a fatal `ConfigError`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Horizon ===
    pub start_date: Date,
    pub end_date: Date,
    /// Cohort synthesized before simulated time begins advancing
    pub initial_population: usize,

    // === Initial cohort shape ===
    /// Knot ages of the piecewise-linear age density
    pub age_knots: Vec<f64>,
    /// Density weight at each knot age
    pub age_weights: Vec<f64>,
    pub male_fraction: f64,

    // === Lifecycle distributions ===
    /// Mean age at death, males
    pub male_life_expectancy: f64,
    /// Mean age at death, females
    pub female_life_expectancy: f64,
    pub salary_mean: f64,
    pub salary_std_dev: f64,
    pub birth_rate_per_woman: f64,
    pub mean_delivery_age: f64,
    /// Inclusive age range within which a woman may bear children
    pub fertility_window: (i16, i16),

    // === Lifecycle ages ===
    pub employment_age: i16,
    pub male_retirement_age: i16,
    pub female_retirement_age: i16,
}

impl SimulationConfig {
    #[must_use]
    pub fn retirement_age(&self, gender: Gender) -> i16 {
        match gender {
            Gender::Male => self.male_retirement_age,
            Gender::Female => self.female_retirement_age,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: date(1991, 9, 1),
            end_date: date(2041, 9, 1),
            initial_population: 1000,
            age_knots: vec![0.0, 30.0, 60.0, 70.0, 110.0],
            age_weights: vec![2.0, 2.5, 1.5, 1.0, 0.0],
            male_fraction: 0.4,
            male_life_expectancy: 61.56,
            female_life_expectancy: 74.03,
            salary_mean: 1000.0,
            salary_std_dev: 400.0,
            birth_rate_per_woman: 2.1,
            mean_delivery_age: 26.0,
            fertility_window: (16, 38),
            employment_age: 18,
            male_retirement_age: 60,
            female_retirement_age: 55,
        }
    }
}
