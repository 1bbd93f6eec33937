//! Whole games on the simulated robot.
//!
//! `StepRng::new(0, 0)` makes the robot always take the first empty cell in
//! row-major order, so every scripted game below is fully determined.

use rand::rngs::mock::StepRng;
use std::time::Duration;
use tictacbot::{
    Cell, ColorClass, GameError, GameOrchestrator, GameResult, Mark, Pose, RobotConfig,
    SimulatedRobot, SimulatorSettings, TurnState,
};

fn cells(moves: &[(usize, usize)]) -> Vec<Cell> {
    moves
        .iter()
        .map(|&(row, col)| Cell::new(row, col).unwrap())
        .collect()
}

fn game(
    config: RobotConfig,
    human_moves: &[(usize, usize)],
) -> GameOrchestrator<SimulatedRobot, StepRng> {
    let settings = SimulatorSettings::from_config(&config).with_human_moves(cells(human_moves));
    GameOrchestrator::new(SimulatedRobot::new(settings), config, StepRng::new(0, 0))
}

fn assert_near_start(robot: &SimulatedRobot) {
    let (row, col) = robot.tile_position();
    assert!((row + 1.0).abs() < 0.25, "row {row}");
    assert!(col.abs() < 0.25, "col {col}");
    let heading = robot.true_heading_degrees().rem_euclid(360.0);
    assert!(heading < 5.0 || heading > 355.0, "heading {heading}");
}

#[test]
fn test_player_wins_on_diagonal() {
    let mut game = game(RobotConfig::default(), &[(0, 0), (1, 1), (2, 2)]);
    let summary = game.play().unwrap();

    assert_eq!(*summary.result(), GameResult::PlayerWin);
    assert_eq!(*summary.player_turns(), 3);
    assert_eq!(*summary.robot_turns(), 2);
    assert_eq!(summary.board().tile(Cell::new(0, 1).unwrap()).mark(), Some(Mark::Robot));
    assert_eq!(summary.board().tile(Cell::new(0, 2).unwrap()).mark(), Some(Mark::Robot));

    // The game ends right after a scan pass.
    assert_eq!(game.pose(), Pose::SCAN_END);
    assert_eq!(game.state(), TurnState::Done(GameResult::PlayerWin));
    assert_eq!(game.hardware().display_text(0), Some("Player Wins"));
}

#[test]
fn test_full_board_is_tie() {
    let mut game = game(RobotConfig::default(), &[(1, 1), (0, 2), (1, 0), (2, 1), (2, 2)]);
    let summary = game.play().unwrap();

    assert_eq!(*summary.result(), GameResult::Tie);
    assert_eq!(*summary.player_turns(), 5);
    assert_eq!(*summary.robot_turns(), 4);
    assert_eq!(summary.board().count_empty(), 0);
    assert_eq!(game.hardware().display_text(0), Some("Tie"));
}

#[test]
fn test_robot_wins_top_row_and_returns_home() {
    let mut game = game(RobotConfig::default(), &[(2, 2), (2, 1), (1, 2)]);
    let summary = game.play().unwrap();

    assert_eq!(*summary.result(), GameResult::RobotWin);
    assert_eq!(*summary.player_turns(), 3);
    assert_eq!(*summary.robot_turns(), 3);
    for col in 0..3 {
        let cell = Cell::new(0, col).unwrap();
        assert_eq!(summary.board().tile(cell).mark(), Some(Mark::Robot));
    }

    assert_eq!(game.pose(), Pose::START);
    assert_near_start(game.hardware());
    assert_eq!(game.hardware().display_text(0), Some("Robot Wins"));
}

#[test]
fn test_physical_board_matches_logical_board() {
    let mut game = game(RobotConfig::default(), &[(2, 2), (2, 1), (1, 2)]);
    let summary = game.play().unwrap();
    assert_eq!(game.hardware().physical_board(), summary.board());
}

#[test]
fn test_leftover_script_is_not_played_after_game_ends() {
    // (0,0) is taken by the robot first, so that move is skipped and the
    // robot completes the top row with (2,0) and (0,2) still scripted.
    let mut game = game(
        RobotConfig::default(),
        &[(1, 1), (0, 0), (2, 2), (2, 0), (0, 2)],
    );
    let summary = game.play().unwrap();

    assert_eq!(*summary.result(), GameResult::RobotWin);
    let physical = game.hardware().physical_board();
    assert_eq!(physical, summary.board());
    assert_eq!(physical.tile(Cell::new(2, 0).unwrap()).mark(), None);
}

#[test]
fn test_missed_player_mark_is_not_retried() {
    let config = RobotConfig::default();
    // The player's pieces read as yellow, the robot looks for red.
    let settings = SimulatorSettings::from_config(&config)
        .with_player_color(ColorClass::Yellow)
        .with_human_moves(cells(&[(1, 1), (2, 2), (2, 1)]));
    let mut game = GameOrchestrator::new(SimulatedRobot::new(settings), config, StepRng::new(0, 0));
    let centre = Cell::new(1, 1).unwrap();

    game.start();
    assert_eq!(game.step().unwrap(), TurnState::Scanning);
    assert_eq!(game.step().unwrap(), TurnState::EvaluateAfterPlayer);

    // The piece is on the table but not on the board, and the pass moved on.
    assert_eq!(game.hardware().physical_board().tile(centre).mark(), Some(Mark::Player));
    assert!(game.board().is_empty(centre));
    assert_eq!(game.board().count_filled(), 0);
    assert_eq!(game.player_turns() + game.robot_turns(), 1);
    let centre_scans = game
        .hardware()
        .display_log()
        .iter()
        .filter(|(line, text)| *line == 0 && text == "1 1")
        .count();
    assert_eq!(centre_scans, 1);

    while !matches!(game.state(), TurnState::Done(_)) {
        game.step().unwrap();
    }
    assert_eq!(game.state(), TurnState::Done(GameResult::RobotWin));
    assert_eq!(game.player_turns(), 3);
    assert_eq!(game.robot_turns(), 3);
    let marked = game.board().count_filled();
    assert_eq!(marked, 3);
    assert!(marked < (game.player_turns() + game.robot_turns()) as usize);
}

#[test]
fn test_marked_tiles_are_never_rescanned() {
    let mut game = game(RobotConfig::default(), &[(1, 1), (0, 2), (1, 0), (2, 1), (2, 2)]);
    game.start();

    let mut passes = 0;
    while !matches!(game.state(), TurnState::Done(_)) {
        if game.state() == TurnState::Scanning {
            let empty_before = game.board().empty_cells();
            game.hardware_mut().clear_sampled_cells();
            game.step().unwrap();
            let sampled: Vec<Cell> = game.hardware().sampled_cells().iter().copied().collect();
            assert_eq!(sampled, empty_before, "pass {passes}");
            passes += 1;
        } else {
            game.step().unwrap();
        }
    }
    assert_eq!(passes, 5);
}

#[test]
fn test_turn_timing_is_reported() {
    let mut game = game(RobotConfig::default(), &[(0, 0), (1, 1), (2, 2)]);
    let summary = game.play().unwrap();

    // Five turns, each at least one second of scanning or a dispense trip.
    assert!(*summary.total_time() > Duration::from_secs(5));
    assert_eq!(*summary.average_turn_time(), *summary.total_time() / 5);

    let robot = game.hardware();
    let total = robot.display_text(1).unwrap();
    let average = robot.display_text(2).unwrap();
    assert!(total.starts_with("Total time was "), "{total}");
    assert!(average.starts_with("Average time per turn was "), "{average}");
}

#[test]
fn test_robot_choice_is_shown_on_display() {
    let mut game = game(RobotConfig::default(), &[(0, 0), (1, 1), (2, 2)]);
    game.play().unwrap();

    let log = game.hardware().display_log();
    assert!(log.contains(&(3, "Chosen Square is (0,1)".to_string())));
    assert!(log.contains(&(3, "Chosen Square is (0,2)".to_string())));
    assert!(log.contains(&(4, "2".to_string())));
}

#[test]
fn test_stalled_motor_halts_game() {
    let mut game = game(RobotConfig::default().with_motion_timeout_ms(300), &[(1, 1)]);
    // The button still works with the motors stalled.
    game.hardware_mut().set_stalled(true);

    let err = game.play().unwrap_err();
    let expected = Duration::from_millis(300);
    assert!(
        matches!(err, GameError::ActuationTimeout { waited, .. } if waited == expected),
        "{err}"
    );

    let robot = game.hardware();
    assert_eq!(robot.wheel_speeds(), (0, 0));
    assert_eq!(robot.dispenser_speed(), 0);
    assert_eq!(robot.display_text(0), Some("Fatal error"));
    assert_eq!(robot.display_text(1), Some(err.to_string().as_str()));
    // One press to start the turn, one to acknowledge the error.
    assert_eq!(robot.presses(), 2);
}
