use jiff::civil::Date;
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::date_math::years_after;
use crate::error::{ConfigError, SamplingError};
use crate::model::Gender;

/// Spread of the delivery-age distribution, in years.
const DELIVERY_AGE_SPREAD: f64 = 5.0;

/// Minimum spacing between consecutive deliveries, in years.
const MIN_SPACING_YEARS: f64 = 1.0;

/// Rejection budget for one `generate` call. Exhausting it means the
/// constraint set is (near-)unsatisfiable for the sampled child count and
/// surfaces as `SamplingError::RetriesExhausted` instead of a hang.
const MAX_REJECTIONS: u32 = 10_000;

/// Generates a mother's complete reproductive schedule up front.
///
/// Given her birth and death dates, produces zero or more (birth date,
/// gender) pairs for her children via rejection sampling: a Poisson child
/// count, normal delivery ages, and three simultaneous constraints. Every
/// age must lie inside the fertility window, consecutive deliveries must be
/// at least one year apart, and every delivery must fall strictly before
/// the mother's death.
#[derive(Debug, Clone)]
pub struct BirthDistribution {
    /// None when the configured rate is zero: `Poisson` requires a positive
    /// mean, and a zero rate always yields an empty schedule anyway.
    children: Option<Poisson<f64>>,
    delivery_age: Normal<f64>,
    min_age: i16,
    max_age: i16,
}

impl BirthDistribution {
    pub fn new(
        birth_rate_per_woman: f64,
        mean_delivery_age: f64,
        fertility_window: (i16, i16),
    ) -> Result<Self, ConfigError> {
        let (min_age, max_age) = fertility_window;
        if min_age < 0 || min_age >= max_age {
            return Err(ConfigError::InvalidFertilityWindow { min_age, max_age });
        }
        if birth_rate_per_woman < 0.0 || !birth_rate_per_woman.is_finite() {
            return Err(ConfigError::NegativeBirthRate(birth_rate_per_woman));
        }

        let children = if birth_rate_per_woman > 0.0 {
            let poisson = Poisson::new(birth_rate_per_woman).map_err(|_| {
                ConfigError::InvalidDistributionParameters {
                    distribution: "children per woman",
                    mean: birth_rate_per_woman,
                    std_dev: 0.0,
                    reason: "rate must be positive and finite",
                }
            })?;
            Some(poisson)
        } else {
            None
        };

        let delivery_age = Normal::new(mean_delivery_age, DELIVERY_AGE_SPREAD).map_err(|_| {
            ConfigError::InvalidDistributionParameters {
                distribution: "delivery age",
                mean: mean_delivery_age,
                std_dev: DELIVERY_AGE_SPREAD,
                reason: "mean must be finite",
            }
        })?;

        Ok(Self {
            children,
            delivery_age,
            min_age,
            max_age,
        })
    }

    /// Produce the full delivery schedule for one mother, dates ascending.
    ///
    /// Returns an empty schedule when the rate is zero or the mother does
    /// not reach the fertility window before her death; otherwise every
    /// returned date lies strictly before `mother_death_date`, inside the
    /// window, and at least one year after the previous one.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mother_birth_date: Date,
        mother_death_date: Date,
    ) -> Result<Vec<(Date, Gender)>, SamplingError> {
        let Some(children) = &self.children else {
            return Ok(Vec::new());
        };

        // A mother who dies before reaching the window can never satisfy
        // the age constraints; without this short-circuit the rejection
        // loop below would spin until the budget runs out.
        let window_opens = years_after(f64::from(self.min_age), mother_birth_date)?;
        if window_opens >= mother_death_date {
            return Ok(Vec::new());
        }

        let count = self.sample_child_count(rng, children);
        if count == 0 {
            return Ok(Vec::new());
        }

        for _ in 0..MAX_REJECTIONS {
            let mut ages: Vec<f64> = (0..count).map(|_| self.delivery_age.sample(rng)).collect();
            ages.sort_by(f64::total_cmp);
            if !self.ages_satisfy(&ages) {
                continue;
            }

            let mut dates = Vec::with_capacity(count);
            for age in &ages {
                dates.push(years_after(*age, mother_birth_date)?);
            }
            // Every delivery must precede the mother's death.
            if dates.last().is_some_and(|last| *last >= mother_death_date) {
                continue;
            }

            return Ok(dates
                .into_iter()
                .map(|date| (date, self.sample_gender(rng)))
                .collect());
        }

        Err(SamplingError::RetriesExhausted {
            attempts: MAX_REJECTIONS,
        })
    }

    /// Poisson child count, capped so that one-year spacing always fits
    /// inside the fertility window.
    fn sample_child_count<R: Rng + ?Sized>(&self, rng: &mut R, children: &Poisson<f64>) -> usize {
        let sampled = children.sample(rng) as usize;
        let max_fit = ((self.max_age - self.min_age) / 2) as usize;
        sampled.min(max_fit)
    }

    fn ages_satisfy(&self, ages: &[f64]) -> bool {
        let (Some(first), Some(last)) = (ages.first(), ages.last()) else {
            return true;
        };
        if *first < f64::from(self.min_age) || *last > f64::from(self.max_age) {
            return false;
        }
        ages
            .windows(2)
            .all(|pair| pair[1] - pair[0] >= MIN_SPACING_YEARS)
    }

    fn sample_gender<R: Rng + ?Sized>(&self, rng: &mut R) -> Gender {
        if rng.random::<f64>() < 0.5 {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}
