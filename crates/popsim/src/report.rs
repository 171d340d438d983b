//! Plain-text report tables for finished runs.

use popsim_core::{PopulationSnapshot, SimulationReport};

fn print_header() {
    println!(
        "{:<12} {:>12} {:>10} {:>14} {:>12}",
        "date", "population", "employed", "total salary", "mean salary"
    );
}

fn print_snapshot(snapshot: &PopulationSnapshot) {
    println!(
        "{:<12} {:>12} {:>10} {:>14} {:>12.2}",
        snapshot.date.to_string(),
        snapshot.population,
        snapshot.employed,
        snapshot.total_salary,
        snapshot.mean_salary
    );
}

/// Yearly aggregates for a single run.
pub fn print_run(run: &SimulationReport) {
    println!("seed {}", run.seed);
    print_header();
    for snapshot in &run.snapshots {
        print_snapshot(snapshot);
    }
    println!(
        "{} persons registered over the whole run",
        run.total_registered
    );
}

/// Final-state summary across a batch of independent runs.
pub fn print_batch(runs: &[SimulationReport]) {
    println!(
        "{:<12} {:>12} {:>10} {:>14} {:>12}",
        "seed", "population", "employed", "total salary", "mean salary"
    );
    for run in runs {
        let Some(last) = run.final_snapshot() else {
            continue;
        };
        println!(
            "{:<12} {:>12} {:>10} {:>14} {:>12.2}",
            run.seed, last.population, last.employed, last.total_salary, last.mean_salary
        );
    }

    let finals: Vec<usize> = runs
        .iter()
        .filter_map(|run| run.final_snapshot().map(|s| s.population))
        .collect();
    if !finals.is_empty() {
        let mean = finals.iter().sum::<usize>() as f64 / finals.len() as f64;
        println!("mean final population across {} runs: {mean:.1}", finals.len());
    }
}
