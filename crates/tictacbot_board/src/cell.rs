//! Validated board coordinates.

use super::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rows and columns on the board.
pub const GRID_SIZE: usize = 3;

/// Number of cells on the board.
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// A cell on the board, row 0 nearest the robot's start pose.
///
/// A `Cell` can only be built from in-range coordinates, so code holding
/// one never needs to re-check bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// All 9 cells in row-major order.
    pub const ALL: [Cell; NUM_CELLS] = [
        Cell { row: 0, col: 0 },
        Cell { row: 0, col: 1 },
        Cell { row: 0, col: 2 },
        Cell { row: 1, col: 0 },
        Cell { row: 1, col: 1 },
        Cell { row: 1, col: 2 },
        Cell { row: 2, col: 0 },
        Cell { row: 2, col: 1 },
        Cell { row: 2, col: 2 },
    ];

    /// Creates a cell, failing with [`BoardError::OutOfRange`] outside `0..=2`.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Row index (0-2).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index (0-2).
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl std::str::FromStr for Cell {
    type Err = BoardError;

    /// Parses `"row,col"`, e.g. `"1,2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || BoardError::Parse {
            input: s.to_string(),
        };
        let (row, col) = s.trim().split_once(',').ok_or_else(parse_err)?;
        let row = row.trim().parse::<usize>().map_err(|_| parse_err())?;
        let col = col.trim().parse::<usize>().map_err(|_| parse_err())?;
        Self::new(row, col)
    }
}
