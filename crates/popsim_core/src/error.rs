use std::fmt;

use jiff::civil::Date;

/// Construction-time contract violations.
///
/// These are fatal configuration errors: a malformed age density or an
/// impossible distribution parameter is reported immediately and never
/// recovered from.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Fewer than two knot ages were supplied for the age density
    TooFewAgeKnots(usize),
    /// Knot ages must be strictly increasing; `index` is the first offender
    NonMonotonicAgeKnots { index: usize },
    /// The weight list must be the same length as the knot list
    KnotWeightMismatch { knots: usize, weights: usize },
    /// Density weights must be non-negative; `index` is the first offender
    NegativeWeight { index: usize },
    /// All density weights are zero, so the density has no mass to sample
    ZeroTotalWeight,
    /// The male fraction must lie in [0, 1]
    MaleFractionOutOfRange(f64),
    /// The fertility window must satisfy `0 <= min_age < max_age`
    InvalidFertilityWindow { min_age: i16, max_age: i16 },
    /// The births-per-woman rate cannot be negative
    NegativeBirthRate(f64),
    InvalidDistributionParameters {
        distribution: &'static str,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
    /// The simulation end date does not lie after the start date
    EmptyDateRange { start: Date, end: Date },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooFewAgeKnots(n) => {
                write!(f, "age density needs at least two knots, got {n}")
            }
            ConfigError::NonMonotonicAgeKnots { index } => {
                write!(f, "age knots must be strictly increasing (knot {index})")
            }
            ConfigError::KnotWeightMismatch { knots, weights } => {
                write!(f, "age density has {knots} knots but {weights} weights")
            }
            ConfigError::NegativeWeight { index } => {
                write!(f, "age density weight {index} is negative")
            }
            ConfigError::ZeroTotalWeight => {
                write!(f, "age density has zero total mass")
            }
            ConfigError::MaleFractionOutOfRange(p) => {
                write!(f, "male fraction {p} is outside [0, 1]")
            }
            ConfigError::InvalidFertilityWindow { min_age, max_age } => {
                write!(f, "fertility window [{min_age}, {max_age}] is invalid")
            }
            ConfigError::NegativeBirthRate(rate) => {
                write!(f, "birth rate per woman {rate} is negative")
            }
            ConfigError::InvalidDistributionParameters {
                distribution,
                mean,
                std_dev,
                reason,
            } => {
                write!(
                    f,
                    "invalid {distribution} parameters (mean={mean}, std_dev={std_dev}): {reason}"
                )
            }
            ConfigError::EmptyDateRange { start, end } => {
                write!(f, "simulation date range {start}..{end} is empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while drawing from a distribution.
///
/// `RetriesExhausted` is the distinguished "unsatisfiable constraint set"
/// failure of the birth rejection sampler: rather than loop forever on a
/// constraint set the normal draws cannot satisfy, the sampler gives up
/// after a fixed budget and reports how many batches it rejected.
#[derive(Debug)]
pub enum SamplingError {
    RetriesExhausted { attempts: u32 },
    /// Calendar overflow while converting a sampled age to a date
    Date(jiff::Error),
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::RetriesExhausted { attempts } => {
                write!(
                    f,
                    "rejection sampling gave up after {attempts} attempts: constraint set appears unsatisfiable"
                )
            }
            SamplingError::Date(e) => write!(f, "date calculation error: {e}"),
        }
    }
}

impl std::error::Error for SamplingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SamplingError::Date(e) => Some(e),
            SamplingError::RetriesExhausted { .. } => None,
        }
    }
}

impl From<jiff::Error> for SamplingError {
    fn from(err: jiff::Error) -> Self {
        SamplingError::Date(err)
    }
}

/// Umbrella error for running a simulation.
#[derive(Debug)]
pub enum SimulationError {
    Config(ConfigError),
    Sampling(SamplingError),
    Date(jiff::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "{e}"),
            SimulationError::Sampling(e) => write!(f, "{e}"),
            SimulationError::Date(e) => write!(f, "date calculation error: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Sampling(e) => Some(e),
            SimulationError::Date(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<SamplingError> for SimulationError {
    fn from(err: SamplingError) -> Self {
        SimulationError::Sampling(err)
    }
}

impl From<jiff::Error> for SimulationError {
    fn from(err: jiff::Error) -> Self {
        SimulationError::Date(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
