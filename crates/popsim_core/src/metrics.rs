//! Aggregate population and income statistics.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::population::Population;

/// A point-in-time aggregate over the population store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub date: Date,
    /// Live persons at the snapshot instant
    pub population: usize,
    /// Persons with a non-zero salary
    pub employed: usize,
    pub total_salary: i64,
    /// Mean salary across employed persons; 0 when nobody is employed
    pub mean_salary: f64,
}

impl PopulationSnapshot {
    #[must_use]
    pub fn measure(date: Date, population: &Population) -> Self {
        let mut employed = 0usize;
        let mut total_salary = 0i64;
        for (_, person) in population.iter() {
            if person.is_employed() {
                employed += 1;
                total_salary += person.salary;
            }
        }
        let mean_salary = if employed > 0 {
            total_salary as f64 / employed as f64
        } else {
            0.0
        };
        Self {
            date,
            population: population.len(),
            employed,
            total_salary,
            mean_salary,
        }
    }
}

/// Everything a finished run reports back to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub seed: u64,
    /// One snapshot at the start, one each January, one at the end date
    pub snapshots: Vec<PopulationSnapshot>,
    /// Ids handed out over the whole run, deceased included
    pub total_registered: u64,
}

impl SimulationReport {
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&PopulationSnapshot> {
        self.snapshots.last()
    }
}
