//! Capabilities the game engine consumes from the robot's hardware.
//!
//! Motors, gyro, color sensor, button and screen sit behind these traits so
//! the turn engine never touches a port directly. [`SimulatedRobot`] is the
//! in-process implementation used by the CLI and the tests.

mod sim;

pub use sim::{SimulatedRobot, SimulatorSettings};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Color classification reported by the color sensor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    /// Nothing recognisable under the sensor.
    #[default]
    None,
    /// Black.
    Black,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Red.
    Red,
    /// White.
    White,
    /// Brown.
    Brown,
}

/// Wheel and dispenser motors with their encoders.
///
/// Encoders count degrees of shaft rotation since their last reset.
pub trait Actuation {
    /// Sets left and right wheel power; opposite signs turn on the spot.
    fn set_wheel_speeds(&mut self, left: i32, right: i32);

    /// Left wheel encoder reading.
    fn wheel_encoder(&mut self) -> i64;

    /// Zeroes the wheel encoder.
    fn reset_wheel_encoder(&mut self);

    /// Sets dispenser motor power.
    fn set_dispenser_speed(&mut self, speed: i32);

    /// Dispenser encoder reading.
    fn dispenser_encoder(&mut self) -> i64;

    /// Zeroes the dispenser encoder.
    fn reset_dispenser_encoder(&mut self);
}

/// Gyro and color sensor.
pub trait Sensing {
    /// Zeroes the integrated gyro heading.
    fn reset_heading(&mut self);

    /// Heading change since the last reset, clockwise positive (degrees).
    fn heading_degrees(&mut self) -> f32;

    /// Instantaneous color under the sensor.
    fn sample_color(&mut self) -> ColorClass;
}

/// The player's turn-end button.
pub trait TurnSignal {
    /// Whether the button is held right now.
    fn is_turn_signal_pressed(&mut self) -> bool;
}

/// Line-addressed text screen for status and results.
pub trait StatusDisplay {
    /// Replaces the text on line `index`.
    fn display_line(&mut self, index: usize, text: &str);
}

/// Monotonic time source that can block.
pub trait Clock {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;

    /// Blocks for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Everything the robot needs to play a game.
pub trait Hardware: Actuation + Sensing + TurnSignal + StatusDisplay + Clock {}

impl<T> Hardware for T where T: Actuation + Sensing + TurnSignal + StatusDisplay + Clock {}
