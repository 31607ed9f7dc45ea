//! Arena - scripted MCTS matchups over the conquest game
//!
//! Runs an experiment definition (or the built-in demo), playing a number
//! of games per matchup between configured search agents, and writes
//! per-agent, per-game, and per-move metric CSVs for analysis.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod agent;
mod config;
mod driver;
mod experiment;
mod records;

use crate::config::ExperimentConfig;
use crate::experiment::run_experiment;
use crate::records::ExperimentWriter;

#[derive(Debug, Parser)]
#[command(name = "arena", about = "Scripted MCTS matchups over the conquest game")]
struct Cli {
    /// Path to a TOML experiment definition; omit to run the built-in demo
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory experiment results are written under
    #[arg(long, default_value = "experiments/data")]
    out: PathBuf,

    /// Override the number of games per matchup
    #[arg(long)]
    games: Option<u32>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::demo(),
    };
    if let Some(games) = cli.games {
        config.games_per_matchup = games;
    }

    info!(
        experiment = %config.name,
        agents = config.agents.len(),
        matchups = config.matchups.len(),
        games_per_matchup = config.games_per_matchup,
        "starting experiment"
    );

    let writer = ExperimentWriter::new(&cli.out, &config.name)?;
    run_experiment(&config, &writer)
}
