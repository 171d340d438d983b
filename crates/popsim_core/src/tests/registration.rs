//! Tests for person registration and lifecycle scheduling
//!
//! These tests verify:
//! - The exact event schedule produced by registering one person
//! - Strictly increasing, never-reused person ids
//! - Store-size accounting as death events fire

use jiff::civil::date;

use crate::config::SimulationConfig;
use crate::model::{Event, Gender, PersonId};
use crate::simulation_state::SimulationState;

fn empty_state(seed: u64) -> SimulationState {
    let config = SimulationConfig {
        initial_population: 0,
        ..Default::default()
    };
    SimulationState::from_config(&config, seed).unwrap()
}

/// Test the fixed scenario: one male born 2000-01-01 gets a death event, an
/// employment-start event at 2018-01-01, a retirement event at 2060-01-01,
/// and no birth events
#[test]
fn test_male_lifecycle_schedule() {
    let mut state = empty_state(42);
    let birth = date(2000, 1, 1);
    let id = state.register(birth, Gender::Male).unwrap();

    let events: Vec<_> = state.queue.iter().collect();
    assert_eq!(events.len(), 3, "expected death + employment + retirement");

    let death_date = events
        .iter()
        .find_map(|(d, e)| matches!(e, Event::Death { person } if *person == id).then_some(*d))
        .expect("no death event scheduled");
    assert!(death_date > birth, "death date {death_date} precedes birth");

    let employment = events
        .iter()
        .find_map(|(d, e)| match e {
            Event::EmploymentStart { person, salary } if *person == id => Some((*d, *salary)),
            _ => None,
        })
        .expect("no employment-start event scheduled");
    assert_eq!(employment.0, date(2018, 1, 1));
    assert!(employment.1 > 0, "pre-sampled salary must be positive");

    let retirement_date = events
        .iter()
        .find_map(|(d, e)| matches!(e, Event::Retirement { person } if *person == id).then_some(*d))
        .expect("no retirement event scheduled");
    assert_eq!(retirement_date, date(2060, 1, 1));

    assert!(
        !events.iter().any(|(_, e)| matches!(e, Event::Birth { .. })),
        "male registration must not schedule birth events"
    );
}

/// Test the death date is deterministic given a fixed seed
#[test]
fn test_death_date_deterministic_given_seed() {
    let death_date = |seed| {
        let mut state = empty_state(seed);
        state.register(date(2000, 1, 1), Gender::Male).unwrap();
        state
            .queue
            .iter()
            .find_map(|(d, e)| matches!(e, Event::Death { .. }).then_some(d))
            .expect("no death event")
    };
    assert_eq!(death_date(42), death_date(42));
}

/// Test a female registration uses the gender-dependent retirement age
#[test]
fn test_female_retirement_age() {
    let mut state = empty_state(42);
    let id = state.register(date(2000, 1, 1), Gender::Female).unwrap();

    let retirement_date = state
        .queue
        .iter()
        .find_map(|(d, e)| matches!(e, Event::Retirement { person } if *person == id).then_some(d))
        .expect("no retirement event scheduled");
    assert_eq!(retirement_date, date(2055, 1, 1));
}

/// Test ids are strictly increasing and never reused, even after deaths
#[test]
fn test_ids_strictly_increasing_never_reused() {
    let mut state = empty_state(7);
    let birth = date(1900, 1, 1);

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(state.register(birth, Gender::Male).unwrap());
    }
    for pair in ids.windows(2) {
        assert!(pair[1] > pair[0], "ids not strictly increasing");
    }
    assert_eq!(ids[0], PersonId(0));

    // Everyone born in 1900 is long dead by 2200
    state.drain(date(2200, 1, 1)).unwrap();
    assert_eq!(state.population.len(), 0);

    let next = state.register(birth, Gender::Male).unwrap();
    assert!(
        next > ids[4],
        "id {next:?} reused after deaths, last was {:?}",
        ids[4]
    );
}

/// Test store size equals registrations minus fired deaths
#[test]
fn test_population_size_accounting() {
    let mut state = empty_state(13);
    let birth = date(1900, 1, 1);
    for _ in 0..20 {
        state.register(birth, Gender::Male).unwrap();
    }
    assert_eq!(state.population.len(), 20);

    state.drain(date(2200, 1, 1)).unwrap();
    assert_eq!(
        state.population.len(),
        0,
        "all 1900-born males must be deceased by 2200"
    );
    assert_eq!(state.population.registered(), 20);
}
