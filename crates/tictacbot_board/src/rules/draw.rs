//! Tie detection for the robot's tic-tac-toe board.

use super::super::Board;
use tracing::instrument;

/// Checks if the board is full (all tiles marked).
///
/// A full board with no winner is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.count_empty() == 0
}

#[cfg(test)]
mod tests {
    use super::super::super::{Cell, Mark};
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_one_empty_tile_not_full() {
        let mut board = Board::new();
        for cell in &Cell::ALL[..8] {
            board.place(*cell, Mark::Player).unwrap();
        }
        assert!(!is_full(&board));
        board.set(2, 2, Mark::Robot).unwrap();
        assert!(is_full(&board));
    }
}
