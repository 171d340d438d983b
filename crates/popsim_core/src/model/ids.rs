//! Unique identifiers for simulation entities

use serde::{Deserialize, Serialize};

/// Unique identifier for a person within a simulation run.
///
/// Ids are assigned by the population store in strictly increasing order and
/// are never reused, even after the person's record is removed at death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u64);
