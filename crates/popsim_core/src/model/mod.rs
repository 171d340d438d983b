mod event;
mod ids;
mod person;

pub use event::Event;
pub use ids::PersonId;
pub use person::{Gender, Person};
