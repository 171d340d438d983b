use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{Gender, PersonId};

/// A deferred lifecycle action, scheduled on the event queue and consumed
/// exactly once when its trigger date comes due.
///
/// Events carry an id plus a pre-computed payload, never a reference into
/// the population store: the record lookup happens at fire time, so an event
/// whose person has already been removed (their death fired first) is a
/// no-op. `Birth` carries the full child descriptor because the child does
/// not exist yet; firing it registers the child, which schedules that
/// child's own lifecycle events in turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Remove the person's record from the population store
    Death { person: PersonId },
    /// Set the salary sampled when the person was registered
    EmploymentStart { person: PersonId, salary: i64 },
    /// Reset the person's salary to 0
    Retirement { person: PersonId },
    /// Register a new person into the population
    Birth { birth_date: Date, gender: Gender },
}
