//! sim-runner: headless runner for the business-creation Markov simulation.
//!
//! Usage:
//!   sim-runner --businesses 20 --iterations 100 --seed 42
//!   sim-runner --config data/business_creation.json --json
//!   sim-runner --runs 10 --quiet
//!   sim-runner --csv timeline.csv --timeline

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use markov_business_core::{
    config::SimConfig,
    engine::Simulation,
    report::RunReport,
    rng::derive_seed,
    types::Iteration,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sim-runner", version, about = "Business creation simulation via Markov chain")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of businesses (recommended 1..=50).
    #[arg(long)]
    businesses: Option<usize>,

    /// Iteration cap (recommended 10..=500).
    #[arg(long)]
    iterations: Option<Iteration>,

    #[arg(long)]
    seed: Option<u64>,

    /// Consecutive runs with seeds derived from --seed; one line each.
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// Print the full run report as JSON.
    #[arg(long)]
    json: bool,

    /// Write the state-distribution timeline as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the state-distribution timeline as a table.
    #[arg(long)]
    timeline: bool,

    /// Only the final summary line(s).
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(n) = cli.businesses {
        config.population_size = n;
    }
    if let Some(n) = cli.iterations {
        config.max_iterations = n;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let simulation = Simulation::from_config(&config).context("invalid simulation config")?;

    if cli.runs > 1 {
        return run_batch(&simulation, cli.runs);
    }

    let outcome = simulation.run_seeded()?;
    let report = RunReport::new(simulation.chain(), &outcome, Some(simulation.seed()));

    if let Some(path) = &cli.csv {
        std::fs::write(path, report::timeline_csv(&report))
            .with_context(|| format!("Cannot write {}", path.display()))?;
        log::info!("timeline written to {}", path.display());
    }

    if cli.json {
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    if cli.quiet {
        println!("{}", report::batch_line(0, &report));
        return Ok(());
    }

    println!("Business Creation Simulation via Markov Chain");
    println!("  businesses: {}", simulation.population_size());
    println!("  iterations: {}", simulation.max_iterations());
    println!("  seed:       {}", simulation.seed());
    println!();

    if cli.timeline {
        println!("=== STATE DISTRIBUTION OVER ITERATIONS ===");
        print!("{}", report::render_timeline(&report));
        println!();
    }

    print!("{}", report::render_summary(&report));
    Ok(())
}

fn run_batch(simulation: &Simulation, runs: u64) -> Result<()> {
    for run_index in 0..runs {
        let outcome = simulation.run_batch_member(run_index)?;
        let seed = derive_seed(simulation.seed(), run_index);
        let report = RunReport::new(simulation.chain(), &outcome, Some(seed));
        println!("{}", report::batch_line(run_index, &report));
    }
    Ok(())
}
