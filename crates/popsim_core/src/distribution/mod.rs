//! Sampling distributions driving the simulation.
//!
//! Every sampler is validated at construction and draws through a caller
//! supplied `Rng`, so a run is deterministic given a seed and a fixed call
//! order. There is no global generator.

mod birth;
mod life_expectancy;
mod population;
mod salary;

pub use birth::BirthDistribution;
pub use life_expectancy::LifeExpectancy;
pub use population::{AgeDistribution, PopulationDistribution};
pub use salary::SalaryDistribution;
