//! Move selection for the robot's turn.

use super::{Board, BoardError, Cell};
use rand::Rng;
use tracing::{debug, instrument};

/// Chooses a cell for the robot uniformly among the empty cells.
///
/// Draws a single index into the list of empty cells, so it finishes in
/// one step however full the board is. With exactly one empty cell the
/// result is that cell. Fails with [`BoardError::BoardFull`] when no cell
/// is empty.
#[instrument(skip(board, rng))]
pub fn choose_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Cell, BoardError> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return Err(BoardError::BoardFull);
    }
    let cell = empty[rng.gen_range(0..empty.len())];
    debug!(%cell, candidates = empty.len(), "Cell chosen");
    Ok(cell)
}
