//! Board error types.

/// Error raised by board access and move selection.
///
/// Every variant marks a logic defect in the caller rather than a
/// recoverable condition; the game loop treats them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Coordinates outside the 3×3 grid.
    #[display("Cell ({row}, {col}) is out of range (must be 0-2)")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Attempt to mark a tile that already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    OccupiedCell {
        /// Row of the occupied tile.
        row: usize,
        /// Column of the occupied tile.
        col: usize,
    },

    /// Move selection with no empty cell left.
    #[display("Board is full, no cell to choose")]
    BoardFull,

    /// Text that is not a `row,col` pair.
    #[display("Cannot parse cell from {input:?} (expected \"row,col\")")]
    Parse {
        /// The rejected text.
        input: String,
    },
}

impl std::error::Error for BoardError {}
