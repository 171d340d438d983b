use jiff::civil::Date;
use rand::Rng;

use crate::date_math::years_ago;
use crate::error::ConfigError;
use crate::model::Gender;

/// Piecewise-linear probability density over ages.
///
/// The density is described by ordered knot ages with a non-negative weight
/// at each knot and interpolates linearly between them. Sampling picks a
/// segment by its trapezoid area, then inverts the linear density inside the
/// segment.
#[derive(Debug, Clone)]
pub struct AgeDistribution {
    knots: Vec<f64>,
    weights: Vec<f64>,
    /// cumulative[i] is the area of segments 0..i; the last entry is the
    /// total mass
    cumulative: Vec<f64>,
}

impl AgeDistribution {
    pub fn new(knots: &[f64], weights: &[f64]) -> Result<Self, ConfigError> {
        if knots.len() < 2 {
            return Err(ConfigError::TooFewAgeKnots(knots.len()));
        }
        if knots.len() != weights.len() {
            return Err(ConfigError::KnotWeightMismatch {
                knots: knots.len(),
                weights: weights.len(),
            });
        }
        if let Some(index) = knots.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ConfigError::NonMonotonicAgeKnots { index: index + 1 });
        }
        if let Some(index) = weights.iter().position(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ConfigError::NegativeWeight { index });
        }

        let mut cumulative = Vec::with_capacity(knots.len());
        let mut total = 0.0;
        for i in 0..knots.len() - 1 {
            cumulative.push(total);
            total += (knots[i + 1] - knots[i]) * (weights[i] + weights[i + 1]) / 2.0;
        }
        cumulative.push(total);

        if total <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        Ok(Self {
            knots: knots.to_vec(),
            weights: weights.to_vec(),
            cumulative,
        })
    }

    /// Draw an age from the density.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let total = self.cumulative[self.cumulative.len() - 1];
        let target = rng.random::<f64>() * total;

        // Last segment whose cumulative area does not exceed the target.
        let segment = match self
            .cumulative
            .iter()
            .rposition(|area| *area <= target)
        {
            Some(i) => i.min(self.knots.len() - 2),
            None => 0,
        };

        self.invert_segment(segment, target - self.cumulative[segment])
    }

    /// Solve for the age within `segment` at which the density's area from
    /// the segment start equals `target`.
    fn invert_segment(&self, segment: usize, target: f64) -> f64 {
        let x0 = self.knots[segment];
        let x1 = self.knots[segment + 1];
        let w0 = self.weights[segment];
        let w1 = self.weights[segment + 1];

        let width = x1 - x0;
        let slope = (w1 - w0) / width;

        // area(t) = w0 * t + slope * t^2 / 2, t in [0, width]
        let t = if slope.abs() < f64::EPSILON * (w0 + w1).max(1.0) {
            if w0 > 0.0 { target / w0 } else { 0.0 }
        } else {
            let discriminant = (w0 * w0 + 2.0 * slope * target).max(0.0);
            (discriminant.sqrt() - w0) / slope
        };

        (x0 + t).clamp(x0, x1)
    }
}

/// Synthesizes the initial cohort: an age drawn from the piecewise-linear
/// density converted to a birth date, plus a weighted coin flip for gender.
#[derive(Debug, Clone)]
pub struct PopulationDistribution {
    ages: AgeDistribution,
    male_fraction: f64,
}

impl PopulationDistribution {
    pub fn new(knots: &[f64], weights: &[f64], male_fraction: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&male_fraction) {
            return Err(ConfigError::MaleFractionOutOfRange(male_fraction));
        }
        Ok(Self {
            ages: AgeDistribution::new(knots, weights)?,
            male_fraction,
        })
    }

    /// Draw a (birth date, gender) pair for a cohort member alive on `today`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        today: Date,
    ) -> Result<(Date, Gender), jiff::Error> {
        let age = self.ages.sample(rng);
        let birth_date = years_ago(age, today)?;
        let gender = if rng.random::<f64>() < self.male_fraction {
            Gender::Male
        } else {
            Gender::Female
        };
        Ok((birth_date, gender))
    }
}
