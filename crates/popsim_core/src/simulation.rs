//! The simulation driver loop.

use jiff::ToSpan;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::metrics::{PopulationSnapshot, SimulationReport};
use crate::simulation_state::SimulationState;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Run one simulation to completion.
///
/// Advances a calendar cursor one month at a time from the configured start
/// to the end date, draining every due event at each step. Aggregates are
/// snapshotted at the start, every January, and at the end date.
pub fn simulate(config: &SimulationConfig, seed: u64) -> Result<SimulationReport> {
    let mut state = SimulationState::from_config(config, seed)?;

    let mut snapshots = vec![PopulationSnapshot::measure(
        state.timeline.start_date,
        &state.population,
    )];

    while state.timeline.current_date < state.timeline.end_date {
        let next = state
            .timeline
            .current_date
            .saturating_add(1.month())
            .min(state.timeline.end_date);
        state.advance_to(next);
        state.drain(next)?;

        if next.month() == 1 || next == state.timeline.end_date {
            snapshots.push(PopulationSnapshot::measure(next, &state.population));
        }
    }

    Ok(SimulationReport {
        seed,
        snapshots,
        total_registered: state.population.registered(),
    })
}

/// Run one independent simulation per seed.
///
/// Every run owns its own generator, so runs are independent and the batch
/// is safe to parallelize; with the `parallel` feature the seeds are spread
/// over a rayon pool.
#[cfg(feature = "parallel")]
pub fn simulate_batch(config: &SimulationConfig, seeds: &[u64]) -> Result<Vec<SimulationReport>> {
    seeds
        .par_iter()
        .map(|&seed| simulate(config, seed))
        .collect()
}

/// Run one independent simulation per seed, sequentially.
#[cfg(not(feature = "parallel"))]
pub fn simulate_batch(config: &SimulationConfig, seeds: &[u64]) -> Result<Vec<SimulationReport>> {
    seeds.iter().map(|&seed| simulate(config, seed)).collect()
}
