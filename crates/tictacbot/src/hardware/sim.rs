//! In-process robot simulator.
//!
//! Time only moves when [`Clock::sleep`] is called, so a whole game runs in
//! milliseconds of wall time and is fully deterministic. Motors integrate
//! over simulated time: wheel power moves the chassis over the tile grid,
//! the gyro accumulates rotation, the dispenser drops a robot piece at the
//! end of its outward stroke. The human is scripted: each button press
//! places the next scripted player piece, until the pieces on the board
//! decide the game.

use super::{Actuation, Clock, ColorClass, Sensing, StatusDisplay, TurnSignal};
use crate::config::RobotConfig;
use derive_setters::Setters;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::Duration;
use tictacbot_board::{Board, BoardError, Cell, Mark, evaluate};
use tracing::{debug, instrument, trace, warn};

/// Largest step the physics is integrated over.
const MAX_STEP: Duration = Duration::from_millis(1);

/// Physical parameters and script of a simulated game.
#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct SimulatorSettings {
    /// Wheel encoder degrees per second per unit of wheel power.
    wheel_rate: f64,
    /// Chassis rotation degrees per second per unit of differential power.
    turn_rate: f64,
    /// Dispenser encoder degrees per second per unit of power.
    dispenser_rate: f64,
    /// Edge length of one tile (cm).
    tile_size_cm: f64,
    /// Wheel encoder degrees per cm driven.
    ticks_per_cm: f64,
    /// Dispenser encoder reading at which a piece drops.
    drop_ticks: i64,
    /// Color the sensor reports over a player piece.
    player_color: ColorClass,
    /// Color the sensor reports over a robot piece.
    robot_piece_color: ColorClass,
    /// Color of an empty tile.
    surface_color: ColorClass,
    /// Cells the human marks, one per button press.
    human_moves: Vec<Cell>,
    /// Whether the motors refuse to move.
    stalled: bool,
}

impl SimulatorSettings {
    /// Settings matching the geometry of `config`.
    pub fn from_config(config: &RobotConfig) -> Self {
        Self {
            wheel_rate: 12.0,
            turn_rate: 9.0,
            dispenser_rate: 60.0,
            tile_size_cm: f64::from(*config.tile_size_cm()),
            ticks_per_cm: f64::from(config.encoder_ticks_per_cm()),
            drop_ticks: *config.rotation_count(),
            player_color: *config.player_color(),
            robot_piece_color: if *config.player_color() == ColorClass::Blue {
                ColorClass::Green
            } else {
                ColorClass::Blue
            },
            surface_color: ColorClass::White,
            human_moves: Vec::new(),
            stalled: false,
        }
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self::from_config(&RobotConfig::default())
    }
}

/// Simulated robot, board and human opponent.
#[derive(Debug)]
pub struct SimulatedRobot {
    settings: SimulatorSettings,
    time: Duration,
    wheel_speeds: (i32, i32),
    dispenser_speed: i32,
    wheel_encoder: f64,
    dispenser_encoder: f64,
    piece_dropped: bool,
    gyro: f64,
    /// Chassis position in cm; `y` runs along rows, `x` along columns.
    x: f64,
    y: f64,
    /// Chassis heading in degrees, clockwise from facing the board.
    heading: f64,
    pieces: Board,
    human_moves: VecDeque<Cell>,
    button_held: bool,
    presses: usize,
    sampled_cells: BTreeSet<Cell>,
    display: BTreeMap<usize, String>,
    display_log: Vec<(usize, String)>,
}

impl SimulatedRobot {
    /// Places the robot on its start pose, one tile before (0,0), facing the board.
    #[instrument(skip(settings))]
    pub fn new(settings: SimulatorSettings) -> Self {
        let human_moves = settings.human_moves.iter().copied().collect();
        let y = -settings.tile_size_cm;
        Self {
            settings,
            time: Duration::ZERO,
            wheel_speeds: (0, 0),
            dispenser_speed: 0,
            wheel_encoder: 0.0,
            dispenser_encoder: 0.0,
            piece_dropped: false,
            gyro: 0.0,
            x: 0.0,
            y,
            heading: 0.0,
            pieces: Board::new(),
            human_moves,
            button_held: false,
            presses: 0,
            sampled_cells: BTreeSet::new(),
            display: BTreeMap::new(),
            display_log: Vec::new(),
        }
    }

    /// Makes the motors ignore power from now on (or move again).
    pub fn set_stalled(&mut self, stalled: bool) {
        self.settings.stalled = stalled;
    }

    /// Puts a piece on the board directly, bypassing the script.
    pub fn place_piece(&mut self, cell: Cell, mark: Mark) -> Result<(), BoardError> {
        self.pieces.place(cell, mark)
    }

    /// Board cell under the color sensor, if any.
    pub fn current_cell(&self) -> Option<Cell> {
        let row = (self.y / self.settings.tile_size_cm).round();
        let col = (self.x / self.settings.tile_size_cm).round();
        if row < 0.0 || col < 0.0 {
            return None;
        }
        Cell::new(row as usize, col as usize).ok()
    }

    /// Chassis position in tiles `(row, col)`, may be off the board.
    pub fn tile_position(&self) -> (f64, f64) {
        (
            self.y / self.settings.tile_size_cm,
            self.x / self.settings.tile_size_cm,
        )
    }

    /// Actual chassis heading, clockwise from the start heading.
    pub fn true_heading_degrees(&self) -> f64 {
        self.heading
    }

    /// Current wheel power.
    pub fn wheel_speeds(&self) -> (i32, i32) {
        self.wheel_speeds
    }

    /// Current dispenser power.
    pub fn dispenser_speed(&self) -> i32 {
        self.dispenser_speed
    }

    /// Pieces physically on the board.
    pub fn physical_board(&self) -> &Board {
        &self.pieces
    }

    /// Cells the color sensor was sampled over since the last clear.
    pub fn sampled_cells(&self) -> &BTreeSet<Cell> {
        &self.sampled_cells
    }

    /// Forgets which cells were sampled.
    pub fn clear_sampled_cells(&mut self) {
        self.sampled_cells.clear();
    }

    /// Number of completed button presses.
    pub fn presses(&self) -> usize {
        self.presses
    }

    /// Text currently on display line `index`.
    pub fn display_text(&self, index: usize) -> Option<&str> {
        self.display.get(&index).map(String::as_str)
    }

    /// Every line ever written, in order.
    pub fn display_log(&self) -> &[(usize, String)] {
        &self.display_log
    }

    /// Integrates motor motion over `dt`.
    fn advance(&mut self, dt: Duration) {
        self.time += dt;
        if self.settings.stalled {
            return;
        }
        let secs = dt.as_secs_f64();
        let (left, right) = self.wheel_speeds;

        if left != 0 && left == right {
            let ticks = f64::from(left) * self.settings.wheel_rate * secs;
            self.wheel_encoder += ticks;
            let cm = ticks / self.settings.ticks_per_cm;
            let rad = self.heading.to_radians();
            self.y += cm * rad.cos();
            self.x += cm * rad.sin();
        } else if left != 0 && left == -right {
            let degrees = f64::from(left) * self.settings.turn_rate * secs;
            self.heading += degrees;
            self.gyro += degrees;
            self.wheel_encoder += f64::from(left) * self.settings.wheel_rate * secs;
        } else if left != 0 || right != 0 {
            trace!(left, right, "Unmodelled wheel combination, chassis held");
        }

        if self.dispenser_speed != 0 {
            self.dispenser_encoder +=
                f64::from(self.dispenser_speed) * self.settings.dispenser_rate * secs;
            if !self.piece_dropped && self.dispenser_encoder >= self.settings.drop_ticks as f64 {
                self.piece_dropped = true;
                self.drop_piece();
            }
        }
    }

    fn drop_piece(&mut self) {
        match self.current_cell() {
            Some(cell) => match self.pieces.place(cell, Mark::Robot) {
                Ok(()) => debug!(%cell, "Robot piece dropped"),
                Err(err) => warn!(%cell, %err, "Piece dropped onto an occupied cell"),
            },
            None => warn!(position = ?self.tile_position(), "Piece dropped off the board"),
        }
    }
}

impl Default for SimulatedRobot {
    fn default() -> Self {
        Self::new(SimulatorSettings::default())
    }
}

impl Actuation for SimulatedRobot {
    fn set_wheel_speeds(&mut self, left: i32, right: i32) {
        self.wheel_speeds = (left, right);
    }

    fn wheel_encoder(&mut self) -> i64 {
        self.wheel_encoder.floor() as i64
    }

    fn reset_wheel_encoder(&mut self) {
        self.wheel_encoder = 0.0;
    }

    fn set_dispenser_speed(&mut self, speed: i32) {
        self.dispenser_speed = speed;
    }

    fn dispenser_encoder(&mut self) -> i64 {
        self.dispenser_encoder.floor() as i64
    }

    fn reset_dispenser_encoder(&mut self) {
        self.dispenser_encoder = 0.0;
        self.piece_dropped = false;
    }
}

impl Sensing for SimulatedRobot {
    fn reset_heading(&mut self) {
        self.gyro = 0.0;
    }

    fn heading_degrees(&mut self) -> f32 {
        self.gyro as f32
    }

    fn sample_color(&mut self) -> ColorClass {
        let Some(cell) = self.current_cell() else {
            return ColorClass::None;
        };
        self.sampled_cells.insert(cell);
        match self.pieces.tile(cell).mark() {
            Some(Mark::Player) => self.settings.player_color,
            Some(Mark::Robot) => self.settings.robot_piece_color,
            None => self.settings.surface_color,
        }
    }
}

impl TurnSignal for SimulatedRobot {
    /// Alternates pressed and released on successive polls; each press lays
    /// the next scripted human piece first.
    fn is_turn_signal_pressed(&mut self) -> bool {
        if self.button_held {
            self.button_held = false;
            return false;
        }
        self.button_held = true;
        self.presses += 1;
        // Presses after the game is decided only acknowledge.
        if evaluate(&self.pieces).is_over() {
            return true;
        }
        if let Some(cell) = self.human_moves.pop_front() {
            match self.pieces.place(cell, Mark::Player) {
                Ok(()) => debug!(%cell, "Human places piece"),
                Err(err) => warn!(%cell, %err, "Scripted human move skipped"),
            }
        }
        true
    }
}

impl StatusDisplay for SimulatedRobot {
    fn display_line(&mut self, index: usize, text: &str) {
        debug!(index, text, "Display");
        self.display.insert(index, text.to_string());
        self.display_log.push((index, text.to_string()));
    }
}

impl Clock for SimulatedRobot {
    fn elapsed(&self) -> Duration {
        self.time
    }

    fn sleep(&mut self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let step = remaining.min(MAX_STEP);
            self.advance(step);
            remaining -= step;
        }
    }
}
