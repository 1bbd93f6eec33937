//! Command-line interface for tictacbot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tictacbot - tic-tac-toe robot turn engine
#[derive(Parser, Debug)]
#[command(name = "tictacbot")]
#[command(about = "Plays tic-tac-toe on a simulated robot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game on the simulated robot against scripted human moves
    Simulate {
        /// Path to a robot config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the robot's move choice (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Human moves in play order, e.g. "0,0 1,1 2,2"
        #[arg(short, long)]
        moves: String,
    },

    /// Print the default robot config as TOML
    DefaultConfig,
}
