//! Game rules for the robot's tic-tac-toe board.
//!
//! Pure functions over [`Board`]. The result is recomputed from the board
//! every time it is needed and never stored.

mod draw;
mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of judging a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameResult {
    /// No line yet and at least one empty tile.
    #[strum(serialize = "In Progress")]
    InProgress,
    /// Board full without a line.
    #[strum(serialize = "Tie")]
    Tie,
    /// The human completed a line.
    #[strum(serialize = "Player Wins")]
    PlayerWin,
    /// The robot completed a line.
    #[strum(serialize = "Robot Wins")]
    RobotWin,
}

impl GameResult {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Judges the board.
///
/// Lines are checked rows first (top to bottom), then columns (left to
/// right), then the main and anti diagonals. When several lines are
/// complete at once, the first one in that order decides the result.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameResult {
    match check_winner(board) {
        Some(Mark::Player) => GameResult::PlayerWin,
        Some(Mark::Robot) => GameResult::RobotWin,
        None if is_full(board) => GameResult::Tie,
        None => GameResult::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINES: [[(usize, usize); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];

    fn board_from(tiles: &[Option<Mark>]) -> Board {
        let mut board = Board::new();
        for (i, tile) in tiles.iter().enumerate() {
            if let Some(mark) = tile {
                board.set(i / 3, i % 3, *mark).unwrap();
            }
        }
        board
    }

    fn has_line(tiles: &[Option<Mark>]) -> bool {
        LINES.iter().any(|line| {
            let [a, b, c] = line.map(|(r, col)| tiles[r * 3 + col]);
            a.is_some() && a == b && b == c
        })
    }

    fn mark_strategy() -> impl Strategy<Value = Mark> {
        prop_oneof![Just(Mark::Player), Just(Mark::Robot)]
    }

    proptest! {
        #[test]
        fn prop_single_owner_line_wins(
            line in 0usize..8,
            mark in mark_strategy(),
            extra in proptest::collection::vec(any::<bool>(), 9),
        ) {
            // The line owner's marks, plus any extra owner marks elsewhere.
            let mut tiles = [None; 9];
            for (i, put) in extra.iter().enumerate() {
                if *put {
                    tiles[i] = Some(mark);
                }
            }
            for (r, c) in LINES[line] {
                tiles[r * 3 + c] = Some(mark);
            }
            let expected = match mark {
                Mark::Player => GameResult::PlayerWin,
                Mark::Robot => GameResult::RobotWin,
            };
            prop_assert_eq!(evaluate(&board_from(&tiles)), expected);
        }

        #[test]
        fn prop_no_line_is_tie_or_in_progress(
            tiles in proptest::collection::vec(
                prop_oneof![Just(None), mark_strategy().prop_map(Some)],
                9,
            ),
        ) {
            prop_assume!(!has_line(&tiles));
            let board = board_from(&tiles);
            let expected = if tiles.iter().all(Option::is_some) {
                GameResult::Tie
            } else {
                GameResult::InProgress
            };
            prop_assert_eq!(evaluate(&board), expected);
        }
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameResult::InProgress);
        assert!(!GameResult::InProgress.is_over());
    }

    #[test]
    #[rustfmt::skip]
    fn test_full_board_without_line_is_tie() {
        use Mark::{Player as P, Robot as R};
        // R R P / P P R / R P P
        let board = board_from(&[
            Some(R), Some(R), Some(P),
            Some(P), Some(P), Some(R),
            Some(R), Some(P), Some(P),
        ]);
        assert_eq!(evaluate(&board), GameResult::Tie);
        assert!(GameResult::Tie.is_over());
    }

    #[test]
    #[rustfmt::skip]
    fn test_first_line_in_scan_order_decides() {
        use Mark::{Player as P, Robot as R};
        let board = board_from(&[
            Some(P), Some(P), Some(P),
            None, None, None,
            Some(R), Some(R), Some(R),
        ]);
        assert_eq!(evaluate(&board), GameResult::PlayerWin);

        let board = board_from(&[
            Some(R), Some(R), Some(R),
            None, None, None,
            Some(P), Some(P), Some(P),
        ]);
        assert_eq!(evaluate(&board), GameResult::RobotWin);

        // Columns left to right: robot column 0 before player column 1.
        let board = board_from(&[
            Some(R), Some(P), None,
            Some(R), Some(P), None,
            Some(R), Some(P), None,
        ]);
        assert_eq!(evaluate(&board), GameResult::RobotWin);
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(GameResult::Tie.to_string(), "Tie");
        assert_eq!(GameResult::PlayerWin.to_string(), "Player Wins");
        assert_eq!(GameResult::RobotWin.to_string(), "Robot Wins");
    }
}
