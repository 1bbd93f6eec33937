//! Turn state machine for one game against a human.

use crate::config::RobotConfig;
use crate::error::GameError;
use crate::hardware::{Clock, Hardware, StatusDisplay, TurnSignal};
use crate::motion::Chassis;
use crate::navigation::{NavigationController, Pose};
use crate::scanner::TileScanner;
use derive_getters::Getters;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tictacbot_board::{Board, Cell, GameResult, Mark, choose_cell, evaluate};
use tracing::{debug, error, info, instrument, warn};

/// Where the game loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TurnState {
    /// Waiting for the player to press and release the turn button.
    AwaitPlayerSignal,
    /// Scan pass over the board.
    Scanning,
    /// Judging the board after the player's move.
    EvaluateAfterPlayer,
    /// Choosing, reaching and marking the robot's cell.
    RobotTurn,
    /// Driving back from the cell just marked.
    ReturnHome {
        /// Cell the robot is standing on.
        cell: Cell,
    },
    /// Judging the board after the robot's move.
    EvaluateAfterRobot,
    /// Game over.
    Done(GameResult),
}

/// Final report of a finished game.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GameSummary {
    /// How the game ended.
    result: GameResult,
    /// Final board.
    board: Board,
    /// Completed player turns.
    player_turns: u32,
    /// Completed robot turns.
    robot_turns: u32,
    /// Time from calibration to the final judgement.
    total_time: Duration,
    /// `total_time` over all turns.
    average_turn_time: Duration,
}

/// Runs a game: owns the board, the turn counters and the robot.
#[derive(Debug)]
pub struct GameOrchestrator<H, R> {
    board: Board,
    navigation: NavigationController<Chassis<H>>,
    scanner: TileScanner,
    rng: R,
    player_turns: u32,
    robot_turns: u32,
    started_at: Duration,
    state: TurnState,
}

impl<H: Hardware> GameOrchestrator<H, ChaCha8Rng> {
    /// Creates a game whose move choice is seeded from `rng_seed`, or from
    /// entropy when unset.
    pub fn from_config(hardware: H, config: RobotConfig) -> Self {
        let rng = match config.rng_seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(hardware, config, rng)
    }
}

impl<H: Hardware, R: Rng> GameOrchestrator<H, R> {
    /// Creates a game with an empty board; the robot must stand on its start pose.
    pub fn new(hardware: H, config: RobotConfig, rng: R) -> Self {
        let scanner = TileScanner::from_config(&config);
        let quarter = *config.turn_angle_deg();
        let half = *config.turn_around_deg();
        Self {
            board: Board::new(),
            navigation: NavigationController::new(Chassis::new(hardware, config), quarter, half),
            scanner,
            rng,
            player_turns: 0,
            robot_turns: 0,
            started_at: Duration::ZERO,
            state: TurnState::AwaitPlayerSignal,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Completed player turns.
    pub fn player_turns(&self) -> u32 {
        self.player_turns
    }

    /// Completed robot turns.
    pub fn robot_turns(&self) -> u32 {
        self.robot_turns
    }

    /// Robot pose bookkeeping.
    pub fn pose(&self) -> Pose {
        self.navigation.pose()
    }

    /// Returns the hardware.
    pub fn hardware(&self) -> &H {
        self.navigation.drive().hardware()
    }

    /// Plays a whole game and reports it.
    ///
    /// On a fatal error the motors are stopped, the error is shown, and the
    /// operator must press the button before the error is returned.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Result<GameSummary, GameError> {
        self.start();
        match self.run_to_completion() {
            Ok(summary) => Ok(summary),
            Err(err) => {
                self.halt(&err);
                Err(err)
            }
        }
    }

    /// Calibrates the gyro and starts the game timer.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.navigation.drive_mut().calibrate();
        self.started_at = self.navigation.drive().elapsed();
        self.state = TurnState::AwaitPlayerSignal;
        info!("Game started");
    }

    /// Runs the current state and moves to the next one.
    ///
    /// `Done` is absorbing.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn step(&mut self) -> Result<TurnState, GameError> {
        let next = match self.state {
            TurnState::AwaitPlayerSignal => {
                self.wait_for_turn_signal();
                TurnState::Scanning
            }
            TurnState::Scanning => {
                self.player_turns += 1;
                self.scan_board()?;
                self.check_turn_count();
                TurnState::EvaluateAfterPlayer
            }
            TurnState::EvaluateAfterPlayer => match self.check_result() {
                GameResult::InProgress => TurnState::RobotTurn,
                result => TurnState::Done(result),
            },
            TurnState::RobotTurn => {
                let cell = self.robot_turn()?;
                TurnState::ReturnHome { cell }
            }
            TurnState::ReturnHome { cell } => {
                self.navigation.return_to_start(cell.row(), cell.col())?;
                TurnState::EvaluateAfterRobot
            }
            TurnState::EvaluateAfterRobot => match self.check_result() {
                GameResult::InProgress => TurnState::AwaitPlayerSignal,
                result => TurnState::Done(result),
            },
            TurnState::Done(result) => TurnState::Done(result),
        };
        debug!(to = %next, "Transition");
        self.state = next;
        Ok(next)
    }

    fn run_to_completion(&mut self) -> Result<GameSummary, GameError> {
        loop {
            if let TurnState::Done(result) = self.state {
                let summary = self.summary(result);
                self.report(&summary);
                self.wait_for_turn_signal();
                return Ok(summary);
            }
            self.step()?;
        }
    }

    /// Scan pass that marks newly seen player pieces; marked tiles are skipped.
    fn scan_board(&mut self) -> Result<(), GameError> {
        let board = &mut self.board;
        let scanner = &self.scanner;
        self.navigation.scan_pass(|cell, chassis| {
            if !board.is_empty(cell) {
                debug!(%cell, "Tile already marked, not scanned");
                return Ok(());
            }
            let hw = chassis.hardware_mut();
            if let Some(mark) = scanner.scan(cell, &mut *hw) {
                board.place(cell, mark)?;
                info!(%cell, "Player mark detected");
            }
            hw.display_line(0, &format!("{} {}", cell.row(), cell.col()));
            hw.display_line(1, &board.tile(cell).code().to_string());
            Ok(())
        })
    }

    /// Picks, records, reaches and marks the robot's cell.
    fn robot_turn(&mut self) -> Result<Cell, GameError> {
        let cell = choose_cell(&self.board, &mut self.rng)?;
        self.board.place(cell, Mark::Robot)?;
        info!(%cell, "Robot chose cell");

        let code = self.board.tile(cell).code();
        let hw = self.hardware_mut();
        hw.display_line(3, &format!("Chosen Square is ({},{})", cell.row(), cell.col()));
        hw.display_line(4, &code.to_string());

        self.navigation.go_to_cell(cell)?;
        self.navigation.drive_mut().dispense()?;
        self.robot_turns += 1;
        self.check_turn_count();
        Ok(cell)
    }

    fn check_result(&self) -> GameResult {
        let result = evaluate(&self.board);
        info!(
            %result,
            player_turns = self.player_turns,
            robot_turns = self.robot_turns,
            "Board judged"
        );
        result
    }

    /// Marks on the board should match the turns taken; a miss is logged, not fatal.
    fn check_turn_count(&self) {
        let filled = self.board.count_filled();
        let turns = (self.player_turns + self.robot_turns) as usize;
        if filled != turns {
            warn!(
                filled,
                turns,
                "Board marks disagree with turn count, a player mark may have been missed"
            );
        }
    }

    /// Blocks until the button is pressed and then released.
    fn wait_for_turn_signal(&mut self) {
        let poll = self.navigation.drive().config().poll_interval();
        let hw = self.hardware_mut();
        while !hw.is_turn_signal_pressed() {
            hw.sleep(poll);
        }
        while hw.is_turn_signal_pressed() {
            hw.sleep(poll);
        }
        debug!("Turn signal received");
    }

    fn summary(&self, result: GameResult) -> GameSummary {
        let total_time = self
            .navigation
            .drive()
            .elapsed()
            .saturating_sub(self.started_at);
        let turns = self.player_turns + self.robot_turns;
        let average_turn_time = if turns == 0 {
            Duration::ZERO
        } else {
            total_time / turns
        };
        GameSummary {
            result,
            board: self.board.clone(),
            player_turns: self.player_turns,
            robot_turns: self.robot_turns,
            total_time,
            average_turn_time,
        }
    }

    fn report(&mut self, summary: &GameSummary) {
        info!(
            result = %summary.result,
            total_s = summary.total_time.as_secs_f64(),
            average_s = summary.average_turn_time.as_secs_f64(),
            "Game over"
        );
        let hw = self.hardware_mut();
        hw.display_line(0, &summary.result.to_string());
        hw.display_line(
            1,
            &format!("Total time was {:.2} s", summary.total_time.as_secs_f64()),
        );
        hw.display_line(
            2,
            &format!(
                "Average time per turn was {:.2} s",
                summary.average_turn_time.as_secs_f64()
            ),
        );
    }

    fn halt(&mut self, err: &GameError) {
        error!(%err, state = %self.state, "Fatal error, halting");
        self.navigation.drive_mut().stop();
        let hw = self.hardware_mut();
        hw.display_line(0, "Fatal error");
        hw.display_line(1, &err.to_string());
        self.wait_for_turn_signal();
    }

    /// Returns the hardware mutably.
    pub fn hardware_mut(&mut self) -> &mut H {
        self.navigation.drive_mut().hardware_mut()
    }
}
