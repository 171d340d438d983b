use jiff::civil::Date;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::date_math::years_after;
use crate::error::ConfigError;
use crate::model::Gender;

/// Spread of the age-at-death distribution, in years.
const AGE_SPREAD: f64 = 12.0;

/// Per-gender normal distribution of age at death.
///
/// A sampled age is clamped below at 0: the normal tail can produce a
/// negative age, which would otherwise only be caught by the clamp inside
/// `years_after` and leave a nonsensical "age" in the sample itself.
#[derive(Debug, Clone)]
pub struct LifeExpectancy {
    male: Normal<f64>,
    female: Normal<f64>,
}

impl LifeExpectancy {
    pub fn new(male_mean: f64, female_mean: f64) -> Result<Self, ConfigError> {
        let build = |mean: f64, distribution: &'static str| {
            Normal::new(mean, AGE_SPREAD).map_err(|_| ConfigError::InvalidDistributionParameters {
                distribution,
                mean,
                std_dev: AGE_SPREAD,
                reason: "mean must be finite",
            })
        };
        Ok(Self {
            male: build(male_mean, "male life expectancy")?,
            female: build(female_mean, "female life expectancy")?,
        })
    }

    /// Draw an age at death, in fractional years.
    pub fn sample_age<R: Rng + ?Sized>(&self, rng: &mut R, gender: Gender) -> f64 {
        let age = match gender {
            Gender::Male => self.male.sample(rng),
            Gender::Female => self.female.sample(rng),
        };
        age.max(0.0)
    }

    /// Draw a death date for a person born on `birth_date`.
    pub fn death_date<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        birth_date: Date,
        gender: Gender,
    ) -> Result<Date, jiff::Error> {
        years_after(self.sample_age(rng, gender), birth_date)
    }
}
