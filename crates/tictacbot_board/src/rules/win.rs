//! Win detection for the robot's tic-tac-toe board.

use super::super::{Board, Cell, Mark, Tile};
use tracing::instrument;

/// Row-major indices of every line, in the order they are checked.
const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first complete line in row, column, diagonal
/// order, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|i| board.tile(Cell::ALL[i]));
        match a {
            Tile::Marked(mark) if a == b && b == c => Some(mark),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_middle_row() {
        let mut board = Board::new();
        for col in 0..3 {
            board.set(1, col, Mark::Robot).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::Robot));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        for row in 0..3 {
            board.set(row, 2, Mark::Player).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::Player));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        board.set(0, 2, Mark::Player).unwrap();
        board.set(1, 1, Mark::Player).unwrap();
        board.set(2, 0, Mark::Player).unwrap();
        assert_eq!(check_winner(&board), Some(Mark::Player));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(0, 0, Mark::Player).unwrap();
        board.set(0, 1, Mark::Robot).unwrap();
        board.set(0, 2, Mark::Player).unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
