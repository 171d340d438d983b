use std::path::{Path, PathBuf};

use clap::Parser;

use popsim_core::{SimulationConfig, simulate, simulate_batch};

mod logging;
mod report;

#[derive(Parser, Debug)]
#[command(name = "popsim")]
#[command(about = "A stochastic, discrete-event demographic simulator")]
struct Args {
    /// Path to a scenario file (JSON `SimulationConfig`); built-in defaults
    /// are used when omitted
    #[arg(short = 'f', long)]
    scenario: Option<PathBuf>,

    /// Seed for the simulation's random number generator
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Override the scenario's initial cohort size
    #[arg(short, long)]
    cohort: Option<usize>,

    /// Number of independent runs; run i uses seed + i
    #[arg(short, long, default_value_t = 1)]
    runs: u64,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn load_scenario(path: &Path) -> color_eyre::Result<SimulationConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init(&args.log_level);

    let mut config = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(cohort) = args.cohort {
        config.initial_population = cohort;
    }

    tracing::info!(
        seed = args.seed,
        runs = args.runs,
        cohort = config.initial_population,
        start = %config.start_date,
        end = %config.end_date,
        "starting simulation"
    );

    if args.runs <= 1 {
        let run = simulate(&config, args.seed)?;
        report::print_run(&run);
    } else {
        let seeds: Vec<u64> = (0..args.runs).map(|i| args.seed.wrapping_add(i)).collect();
        let runs = simulate_batch(&config, &seeds)?;
        report::print_batch(&runs);
    }

    tracing::info!("simulation finished");
    Ok(())
}
