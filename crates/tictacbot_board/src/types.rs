//! Core domain types for the robot's tic-tac-toe board.

use super::cell::{Cell, GRID_SIZE, NUM_CELLS};
use super::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Who put a mark on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// The human opponent, detected by the color sensor.
    Player,
    /// The robot, placed by the dispenser.
    Robot,
}

/// A tile on the board.
///
/// Only `Empty → Marked` transitions exist; [`Board`] refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Nobody has marked this tile yet.
    #[default]
    Empty,
    /// Tile holds a mark.
    Marked(Mark),
}

impl Tile {
    /// Numeric code shown on the status display (0 empty, 1 player, 2 robot).
    pub fn code(self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Marked(Mark::Player) => 1,
            Tile::Marked(Mark::Robot) => 2,
        }
    }

    /// Returns the mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Tile::Empty => None,
            Tile::Marked(mark) => Some(mark),
        }
    }
}

/// 3x3 board of tiles, row 0 nearest the robot's start pose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Tiles in row-major order (0-8).
    tiles: [Tile; NUM_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            tiles: [Tile::Empty; NUM_CELLS],
        }
    }

    /// Gets the tile at `(row, col)`.
    #[instrument(skip(self))]
    pub fn get(&self, row: usize, col: usize) -> Result<Tile, BoardError> {
        Ok(self.tile(Cell::new(row, col)?))
    }

    /// Marks the tile at `(row, col)`.
    ///
    /// Fails with [`BoardError::OccupiedCell`] if the tile already holds a
    /// mark; the existing mark is left untouched.
    #[instrument(skip(self))]
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        self.place(Cell::new(row, col)?, mark)
    }

    /// Gets the tile at an already validated cell.
    pub fn tile(&self, cell: Cell) -> Tile {
        self.tiles[cell.index()]
    }

    /// Marks the tile at an already validated cell.
    #[instrument(skip(self))]
    pub fn place(&mut self, cell: Cell, mark: Mark) -> Result<(), BoardError> {
        let tile = &mut self.tiles[cell.index()];
        if *tile != Tile::Empty {
            return Err(BoardError::OccupiedCell {
                row: cell.row(),
                col: cell.col(),
            });
        }
        *tile = Tile::Marked(mark);
        debug!(%cell, %mark, "Tile marked");
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.tile(cell) == Tile::Empty
    }

    /// Number of marked tiles.
    pub fn count_filled(&self) -> usize {
        self.tiles.iter().filter(|t| **t != Tile::Empty).count()
    }

    /// Number of empty tiles.
    pub fn count_empty(&self) -> usize {
        NUM_CELLS - self.count_filled()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::ALL
            .iter()
            .copied()
            .filter(|cell| self.is_empty(*cell))
            .collect()
    }

    /// Formats the board as a human-readable grid, row 0 on top.
    ///
    /// `X` is the player, `O` the robot, `.` an empty tile.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let symbol = match self.tiles[row * GRID_SIZE + col] {
                    Tile::Empty => '.',
                    Tile::Marked(Mark::Player) => 'X',
                    Tile::Marked(Mark::Robot) => 'O',
                };
                result.push(symbol);
                if col < GRID_SIZE - 1 {
                    result.push('|');
                }
            }
            if row < GRID_SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.count_filled(), 0);
        assert_eq!(board.count_empty(), 9);
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_set_then_get() {
        let mut board = Board::new();
        board.set(1, 2, Mark::Robot).unwrap();
        assert_eq!(board.get(1, 2), Ok(Tile::Marked(Mark::Robot)));
        assert_eq!(board.get(2, 1), Ok(Tile::Empty));
        assert_eq!(board.count_filled(), 1);
        assert_eq!(board.count_empty(), 8);
    }

    #[test]
    fn test_set_occupied_never_overwrites() {
        let mut board = Board::new();
        board.set(0, 0, Mark::Player).unwrap();
        for mark in [Mark::Player, Mark::Robot] {
            assert_eq!(
                board.set(0, 0, mark),
                Err(BoardError::OccupiedCell { row: 0, col: 0 })
            );
        }
        assert_eq!(board.get(0, 0), Ok(Tile::Marked(Mark::Player)));
        assert_eq!(board.count_filled(), 1);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut board = Board::new();
        assert_eq!(board.get(3, 0), Err(BoardError::OutOfRange { row: 3, col: 0 }));
        assert_eq!(
            board.set(0, 7, Mark::Robot),
            Err(BoardError::OutOfRange { row: 0, col: 7 })
        );
        assert_eq!(board.count_filled(), 0);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(0, 0, Mark::Player).unwrap();
        board.set(2, 2, Mark::Robot).unwrap();
        assert_eq!(board.display(), "X|.|.\n-+-+-\n.|.|.\n-+-+-\n.|.|O");
    }

    #[test]
    fn test_tile_codes() {
        assert_eq!(Tile::Empty.code(), 0);
        assert_eq!(Tile::Marked(Mark::Player).code(), 1);
        assert_eq!(Tile::Marked(Mark::Robot).code(), 2);
    }
}
