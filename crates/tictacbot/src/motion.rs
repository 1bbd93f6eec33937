//! Blocking motion primitives on top of the raw hardware.
//!
//! Every wait in here polls a completion condition under a watchdog
//! deadline, so a stalled motor surfaces as
//! [`GameError::ActuationTimeout`] instead of a hang.

use crate::config::RobotConfig;
use crate::error::GameError;
use crate::hardware::{Actuation, Clock, Hardware, Sensing};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Motion primitive, named in timeout errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Primitive {
    /// Drive forward one tile.
    #[strum(serialize = "drive one tile")]
    DriveTile,
    /// Turn clockwise on the spot.
    #[strum(serialize = "clockwise turn")]
    TurnClockwise,
    /// Turn counter-clockwise on the spot.
    #[strum(serialize = "counter-clockwise turn")]
    TurnCounterClockwise,
    /// Dispenser stroke.
    #[strum(serialize = "dispense")]
    Dispense,
}

/// Blocking drive and turn primitives used by navigation.
///
/// Each call returns once the movement has physically completed.
pub trait Drive {
    /// Drives forward one tile.
    fn drive_one_tile(&mut self) -> Result<(), GameError>;

    /// Turns clockwise on the spot by `angle_deg`.
    fn turn_clockwise(&mut self, angle_deg: f32) -> Result<(), GameError>;

    /// Turns counter-clockwise on the spot by `angle_deg`.
    fn turn_counter_clockwise(&mut self, angle_deg: f32) -> Result<(), GameError>;
}

/// The robot's drive base and dispenser driven through [`Hardware`].
#[derive(Debug)]
pub struct Chassis<H> {
    hardware: H,
    config: RobotConfig,
}

impl<H: Hardware> Chassis<H> {
    /// Wraps hardware with the given tuning.
    pub fn new(hardware: H, config: RobotConfig) -> Self {
        Self { hardware, config }
    }

    /// Returns the hardware.
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Returns the hardware mutably, for sensing and display.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Returns the tuning in use.
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Zeroes the gyro and lets it settle before the first turn.
    #[instrument(skip(self))]
    pub fn calibrate(&mut self) {
        self.hardware.reset_heading();
        self.hardware.sleep(self.config.settle_delay());
        debug!("Gyro calibrated");
    }

    /// Stops every motor.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.hardware.set_wheel_speeds(0, 0);
        self.hardware.set_dispenser_speed(0);
    }

    /// Drives straight until the wheel encoder reaches `ticks`.
    #[instrument(skip(self))]
    pub fn drive_distance(&mut self, ticks: i64, power: i32) -> Result<(), GameError> {
        self.hardware.reset_wheel_encoder();
        self.hardware.set_wheel_speeds(power, power);
        self.wait_until(Primitive::DriveTile, |hw| hw.wheel_encoder() >= ticks)?;
        self.hardware.set_wheel_speeds(0, 0);
        Ok(())
    }

    /// Runs one dispenser stroke: out to the rotation count and back to zero.
    #[instrument(skip(self))]
    pub fn dispense(&mut self) -> Result<(), GameError> {
        let speed = *self.config.dispense_speed();
        let target = *self.config.rotation_count();

        self.hardware.reset_dispenser_encoder();
        self.hardware.set_dispenser_speed(speed);
        self.wait_until(Primitive::Dispense, |hw| hw.dispenser_encoder() >= target)?;

        self.hardware.set_dispenser_speed(-speed);
        self.wait_until(Primitive::Dispense, |hw| hw.dispenser_encoder() <= 0)?;

        self.hardware.set_dispenser_speed(0);
        debug!("Piece dispensed");
        Ok(())
    }

    /// Spins in place until the gyro reports `angle_deg`, then resets it.
    ///
    /// `direction` is +1 for clockwise and -1 for counter-clockwise.
    fn turn(
        &mut self,
        primitive: Primitive,
        direction: i32,
        angle_deg: f32,
    ) -> Result<(), GameError> {
        let power = *self.config.slow_speed() * direction;
        self.hardware.set_wheel_speeds(power, -power);
        self.wait_until(primitive, |hw| hw.heading_degrees().abs() >= angle_deg)?;
        self.hardware.set_wheel_speeds(0, 0);

        // Gyro error must not carry over into the next turn.
        self.hardware.reset_heading();
        self.hardware.sleep(self.config.settle_delay());
        Ok(())
    }

    /// Polls `done` until it holds or the watchdog deadline passes.
    ///
    /// On timeout all motors are stopped before the error is returned.
    fn wait_until<F>(&mut self, primitive: Primitive, mut done: F) -> Result<(), GameError>
    where
        F: FnMut(&mut H) -> bool,
    {
        let timeout = self.config.motion_timeout();
        let poll = self.config.poll_interval();
        let start = self.hardware.elapsed();
        loop {
            if done(&mut self.hardware) {
                return Ok(());
            }
            let waited = self.hardware.elapsed().saturating_sub(start);
            if waited >= timeout {
                warn!(%primitive, waited_ms = waited.as_millis() as u64, "Watchdog expired");
                self.stop();
                return Err(GameError::ActuationTimeout {
                    primitive,
                    waited: timeout,
                });
            }
            self.hardware.sleep(poll.min(timeout - waited));
        }
    }

    /// Time since the hardware clock started.
    pub fn elapsed(&self) -> Duration {
        self.hardware.elapsed()
    }
}

impl<H: Hardware> Drive for Chassis<H> {
    #[instrument(skip(self))]
    fn drive_one_tile(&mut self) -> Result<(), GameError> {
        let ticks = self.config.tile_ticks();
        let power = *self.config.medium_speed();
        self.drive_distance(ticks, power)?;
        self.hardware.sleep(self.config.post_tile_wait());
        Ok(())
    }

    #[instrument(skip(self))]
    fn turn_clockwise(&mut self, angle_deg: f32) -> Result<(), GameError> {
        self.turn(Primitive::TurnClockwise, 1, angle_deg)
    }

    #[instrument(skip(self))]
    fn turn_counter_clockwise(&mut self, angle_deg: f32) -> Result<(), GameError> {
        self.turn(Primitive::TurnCounterClockwise, -1, angle_deg)
    }
}
