//! Integration tests for the popsim simulation engine
//!
//! Tests are organized by topic:
//! - `birth` - Birth schedule rejection sampler constraints
//! - `distributions` - Age, gender, salary, and life-expectancy sampling
//! - `registration` - Person registration and lifecycle scheduling
//! - `simulation` - Full-run behavior: draining, snapshots, determinism

mod distributions;
mod registration;
