//! Turn engine for a tic-tac-toe playing robot.
//!
//! The robot waits for the player's turn signal, sweeps the 3x3 board
//! with its color sensor, judges the position, drives to a randomly
//! chosen empty tile, drops a piece and returns home. Motion is open-loop:
//! a tile is a fixed encoder distance and turns are gyro-limited.
//!
//! # Architecture
//!
//! - **Hardware**: trait seams for motors, sensors, button, display and clock,
//!   with a [`SimulatedRobot`] behind them
//! - **Motion**: blocking drive, turn and dispense primitives under a watchdog
//! - **Navigation**: serpentine scan pass and cell round trips with pose bookkeeping
//! - **Scanner**: timed color sampling of a single tile
//! - **Orchestrator**: the turn state machine tying it together
//!
//! # Example
//!
//! ```
//! use tictacbot::{Cell, GameOrchestrator, RobotConfig, SimulatedRobot, SimulatorSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RobotConfig::default().with_rng_seed(Some(7));
//! let moves = vec![Cell::new(0, 0)?, Cell::new(1, 1)?, Cell::new(2, 2)?];
//! let settings = SimulatorSettings::from_config(&config).with_human_moves(moves);
//! let robot = SimulatedRobot::new(settings);
//! let mut game = GameOrchestrator::from_config(robot, config);
//! let summary = game.play()?;
//! assert!(summary.result().is_over());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod hardware;
mod motion;
mod navigation;
mod orchestrator;
mod scanner;

// Crate-level exports - Configuration
pub use config::{ConfigError, RobotConfig};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Hardware seams and simulator
pub use hardware::{
    Actuation, Clock, ColorClass, Hardware, Sensing, SimulatedRobot, SimulatorSettings,
    StatusDisplay, TurnSignal,
};

// Crate-level exports - Motion and navigation
pub use motion::{Chassis, Drive, Primitive};
pub use navigation::{Heading, NavigationController, Pose};

// Crate-level exports - Perception and game loop
pub use orchestrator::{GameOrchestrator, GameSummary, TurnState};
pub use scanner::TileScanner;

// Crate-level exports - Board types
pub use tictacbot_board::{Board, BoardError, Cell, GameResult, Mark, Tile};
