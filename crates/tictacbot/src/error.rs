//! Fatal errors raised while a game is running.

use crate::motion::Primitive;
use crate::navigation::Pose;
use std::time::Duration;
use tictacbot_board::BoardError;

/// Error that ends the current game.
///
/// None of these are retried: the robot stops its motors, shows the error
/// and waits for the operator.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum GameError {
    /// Board access or move selection failed.
    #[display("Board error: {}", _0)]
    Board(BoardError),

    /// A motion primitive did not reach its completion condition in time.
    #[display("{primitive} did not complete within {} ms", waited.as_millis())]
    ActuationTimeout {
        /// The primitive that stalled.
        primitive: Primitive,
        /// How long it was given.
        waited: Duration,
    },

    /// A routine was started from a pose it is not defined for.
    #[display("Robot expected at {expected} but is at {actual}")]
    UnexpectedPose {
        /// Pose the routine starts from.
        expected: Pose,
        /// Pose the bookkeeping holds.
        actual: Pose,
    },
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}
