//! Tic-tac-toe board logic for the tic-tac-toe robot.
//!
//! This crate knows nothing about motors or sensors. It owns the 3×3 grid,
//! the rules that judge it, and the robot's move selection.
//!
//! # Architecture
//!
//! - **Board**: tile storage that refuses to overwrite a marked tile
//! - **Rules**: win and tie detection (rows, then columns, then diagonals)
//! - **Selector**: uniform choice over the empty cells
//!
//! # Example
//!
//! ```
//! use tictacbot_board::{Board, GameResult, Mark, evaluate};
//!
//! let mut board = Board::new();
//! for col in 0..3 {
//!     board.set(0, col, Mark::Player).unwrap();
//! }
//! assert_eq!(evaluate(&board), GameResult::PlayerWin);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cell;
mod error;
mod rules;
mod selector;
mod types;

pub use cell::{Cell, GRID_SIZE, NUM_CELLS};
pub use error::BoardError;
pub use rules::{GameResult, check_winner, evaluate, is_full};
pub use selector::choose_cell;
pub use types::{Board, Mark, Tile};
