use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// A member of the simulated population.
///
/// The salary is 0 while the person is not employed: records are created
/// with salary 0, the employment-start event sets a sampled positive value,
/// and the retirement event resets it to 0. No other field is ever mutated;
/// the record itself is removed from the store when the death event fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub birth_date: Date,
    pub gender: Gender,
    pub salary: i64,
}

impl Person {
    #[must_use]
    pub fn new(birth_date: Date, gender: Gender) -> Self {
        Self {
            birth_date,
            gender,
            salary: 0,
        }
    }

    #[must_use]
    pub fn is_employed(&self) -> bool {
        self.salary > 0
    }
}
