//! Open-loop navigation over the 3×3 grid.
//!
//! The robot never localizes itself. It runs fixed sequences of tile steps
//! and quarter turns whose end poses are known by construction, and keeps
//! its [`Pose`] as bookkeeping of the primitives it has executed:
//!
//! ```text
//!   row 3   .  .  E      E: end of scan pass, facing north
//!   row 2   >  >  ^
//!   row 1   ^  <  <
//!   row 0   >  >  ^
//!   row -1  S            S: start pose, facing north (towards row 2)
//!         col0 col1 col2
//! ```

use crate::error::GameError;
use crate::motion::Drive;
use tictacbot_board::{Cell, GRID_SIZE};
use tracing::{debug, instrument};

const LAST: i32 = GRID_SIZE as i32 - 1;

/// Direction the robot faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Heading {
    /// Towards higher rows.
    North,
    /// Towards higher columns.
    East,
    /// Towards lower rows.
    South,
    /// Towards lower columns.
    West,
}

impl Heading {
    /// Heading after `quarters` clockwise quarter turns.
    pub fn clockwise(self, quarters: u8) -> Self {
        let order = [Heading::North, Heading::East, Heading::South, Heading::West];
        let index = order.iter().position(|h| *h == self).unwrap_or(0);
        order[(index + usize::from(quarters)) % 4]
    }

    /// Heading after `quarters` counter-clockwise quarter turns.
    pub fn counter_clockwise(self, quarters: u8) -> Self {
        self.clockwise((4 - quarters % 4) % 4)
    }

    /// `(row, col)` change of one tile step.
    pub fn step(self) -> (i32, i32) {
        match self {
            Heading::North => (1, 0),
            Heading::East => (0, 1),
            Heading::South => (-1, 0),
            Heading::West => (0, -1),
        }
    }
}

/// Logical position and heading of the robot.
///
/// Row and column are signed: the start and end poses lie one tile off the
/// board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    /// Row, -1 before the board.
    pub row: i32,
    /// Column.
    pub col: i32,
    /// Facing.
    pub heading: Heading,
}

impl Pose {
    /// Where every scan pass starts: one tile before (0,0), facing the board.
    pub const START: Pose = Pose {
        row: -1,
        col: 0,
        heading: Heading::North,
    };

    /// Where every scan pass ends: one tile past (2,2).
    pub const SCAN_END: Pose = Pose {
        row: LAST + 1,
        col: LAST,
        heading: Heading::North,
    };

    /// Pose facing west over `cell`, where [`NavigationController::go_to_cell`] ends.
    pub fn over(cell: Cell) -> Pose {
        Pose {
            row: cell.row() as i32,
            col: cell.col() as i32,
            heading: Heading::West,
        }
    }

    /// Board cell under the robot, if any.
    pub fn cell(self) -> Option<Cell> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        Cell::new(row, col).ok()
    }

    fn advanced(self) -> Pose {
        let (dr, dc) = self.heading.step();
        Pose {
            row: self.row + dr,
            col: self.col + dc,
            ..self
        }
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) facing {}", self.row, self.col, self.heading)
    }
}

/// Executes the fixed routines and keeps pose bookkeeping.
#[derive(Debug)]
pub struct NavigationController<D> {
    drive: D,
    pose: Pose,
    quarter_turn_deg: f32,
    half_turn_deg: f32,
}

impl<D: Drive> NavigationController<D> {
    /// Creates a controller for a robot standing on [`Pose::START`].
    pub fn new(drive: D, quarter_turn_deg: f32, half_turn_deg: f32) -> Self {
        Self {
            drive,
            pose: Pose::START,
            quarter_turn_deg,
            half_turn_deg,
        }
    }

    /// Current pose bookkeeping.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Returns the drive.
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Returns the drive mutably.
    pub fn drive_mut(&mut self) -> &mut D {
        &mut self.drive
    }

    /// Visits every cell once along the serpentine, calling `visit` on each.
    ///
    /// Row 0 is crossed eastward, row 1 westward, row 2 eastward, so every
    /// move between consecutive cells is a single forward tile. Starts at
    /// [`Pose::START`] and ends at [`Pose::SCAN_END`].
    #[instrument(skip(self, visit))]
    pub fn scan_pass<F>(&mut self, mut visit: F) -> Result<(), GameError>
    where
        F: FnMut(Cell, &mut D) -> Result<(), GameError>,
    {
        self.expect_pose(Pose::START)?;

        for row in 0..GRID_SIZE {
            let eastward = row % 2 == 0;
            for step in 0..GRID_SIZE {
                if step == 1 {
                    self.turn_into_row(eastward)?;
                }
                self.forward()?;
                let col = if eastward { step } else { GRID_SIZE - 1 - step };
                let cell = Cell::new(row, col)?;
                debug_assert_eq!(self.pose.cell(), Some(cell));
                visit(cell, &mut self.drive)?;
            }
            self.turn_into_row(!eastward)?;
        }

        self.forward()?;
        debug!(pose = %self.pose, "Scan pass complete");
        Ok(())
    }

    /// Drives from [`Pose::SCAN_END`] to `target`.
    ///
    /// Turn around, step back onto (2,2), walk down column 2 to the target
    /// row, turn to face west and walk along the row to the target column.
    /// Only tile counts derived from `target` are used.
    #[instrument(skip(self))]
    pub fn go_to_cell(&mut self, target: Cell) -> Result<(), GameError> {
        self.expect_pose(Pose::SCAN_END)?;

        self.turn_clockwise(2)?;
        self.forward()?;
        self.forward_n(GRID_SIZE - 1 - target.row())?;
        self.turn_clockwise(1)?;
        self.forward_n(GRID_SIZE - 1 - target.col())?;

        debug_assert_eq!(self.pose, Pose::over(target));
        debug!(pose = %self.pose, "Arrived at target cell");
        Ok(())
    }

    /// Drives from `(row, col)`, reached by [`go_to_cell`](Self::go_to_cell),
    /// back to [`Pose::START`].
    ///
    /// Walk west to column 0, turn to face south, walk down to row 0, step
    /// off the board and turn around.
    #[instrument(skip(self))]
    pub fn return_to_start(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        let cell = Cell::new(row, col)?;
        self.expect_pose(Pose::over(cell))?;

        self.forward_n(col)?;
        self.turn_counter_clockwise(1)?;
        self.forward_n(row)?;
        self.forward()?;
        self.turn_clockwise(2)?;

        debug_assert_eq!(self.pose, Pose::START);
        debug!("Back at start pose");
        Ok(())
    }

    fn expect_pose(&self, expected: Pose) -> Result<(), GameError> {
        if self.pose != expected {
            return Err(GameError::UnexpectedPose {
                expected,
                actual: self.pose,
            });
        }
        Ok(())
    }

    /// Turns from the column axis into a row, or back out of it.
    fn turn_into_row(&mut self, clockwise: bool) -> Result<(), GameError> {
        if clockwise {
            self.turn_clockwise(1)
        } else {
            self.turn_counter_clockwise(1)
        }
    }

    fn forward(&mut self) -> Result<(), GameError> {
        self.drive.drive_one_tile()?;
        self.pose = self.pose.advanced();
        Ok(())
    }

    fn forward_n(&mut self, tiles: usize) -> Result<(), GameError> {
        for _ in 0..tiles {
            self.forward()?;
        }
        Ok(())
    }

    fn turn_clockwise(&mut self, quarters: u8) -> Result<(), GameError> {
        self.drive.turn_clockwise(self.angle(quarters))?;
        self.pose.heading = self.pose.heading.clockwise(quarters);
        Ok(())
    }

    fn turn_counter_clockwise(&mut self, quarters: u8) -> Result<(), GameError> {
        self.drive.turn_counter_clockwise(self.angle(quarters))?;
        self.pose.heading = self.pose.heading.counter_clockwise(quarters);
        Ok(())
    }

    fn angle(&self, quarters: u8) -> f32 {
        if quarters == 2 {
            self.half_turn_deg
        } else {
            self.quarter_turn_deg * f32::from(quarters)
        }
    }
}
