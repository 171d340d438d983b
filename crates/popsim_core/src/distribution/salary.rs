use rand::Rng;
use rand_distr::{Distribution, LogNormal};

use crate::error::ConfigError;

/// Log-normal income distribution parameterized by the desired arithmetic
/// mean and standard deviation of the samples.
///
/// The log-space parameters are derived analytically from the target
/// moments, so samples are always positive and average to the configured
/// mean:
///
/// ```text
/// mu    = ln(m^2 / sqrt(v + m^2))
/// sigma = sqrt(ln(1 + v / m^2))
/// ```
#[derive(Debug, Clone)]
pub struct SalaryDistribution {
    dist: LogNormal<f64>,
}

impl SalaryDistribution {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidDistributionParameters {
            distribution: "salary",
            mean,
            std_dev,
            reason,
        };
        if !(mean > 0.0 && mean.is_finite()) || !(std_dev > 0.0 && std_dev.is_finite()) {
            return Err(invalid("mean and std_dev must be positive and finite"));
        }

        let variance = std_dev * std_dev;
        let mu = (mean * mean / (variance + mean * mean).sqrt()).ln();
        let sigma = (1.0 + variance / (mean * mean)).ln().sqrt();

        let dist = LogNormal::new(mu, sigma)
            .map_err(|_| invalid("derived log-space parameters are degenerate"))?;
        Ok(Self { dist })
    }

    /// Draw a salary, rounded to the nearest whole monetary unit.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.dist.sample(rng).round() as i64
    }
}
