//! Tictacbot - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictacbot::{Cell, GameOrchestrator, RobotConfig, SimulatedRobot, SimulatorSettings};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Simulate { config, seed, moves } => run_simulation(config, seed, &moves),
        Command::DefaultConfig => {
            print!("{}", RobotConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Parses a whitespace separated list of "row,col" moves.
fn parse_moves(moves: &str) -> Result<Vec<Cell>> {
    moves
        .split_whitespace()
        .map(|m| m.parse::<Cell>().with_context(|| format!("Invalid move '{m}'")))
        .collect()
}

/// Plays one game on the simulator and prints the outcome.
#[instrument(skip(moves))]
fn run_simulation(config_path: Option<PathBuf>, seed: Option<u64>, moves: &str) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RobotConfig::from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RobotConfig::default(),
    };
    if seed.is_some() {
        config = config.with_rng_seed(seed);
    }

    let moves = parse_moves(moves)?;
    info!(count = moves.len(), "Scripted human moves loaded");

    let settings = SimulatorSettings::from_config(&config).with_human_moves(moves);
    let robot = SimulatedRobot::new(settings);
    let mut game = GameOrchestrator::from_config(robot, config);
    let summary = game.play().context("Game aborted")?;

    println!("{}", summary.board().display());
    println!();
    println!("{}", summary.result());
    println!(
        "Total time was {:.2} s over {} player and {} robot turns",
        summary.total_time().as_secs_f64(),
        summary.player_turns(),
        summary.robot_turns()
    );
    println!(
        "Average time per turn was {:.2} s",
        summary.average_turn_time().as_secs_f64()
    );
    Ok(())
}
