//! Robot configuration.
//!
//! Defaults reproduce the constants the robot was tuned with; a TOML file
//! may override any subset of them.

use crate::hardware::ColorClass;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunable constants for one class of robot hardware.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct RobotConfig {
    /// Edge length of one board tile (cm).
    tile_size_cm: f32,

    /// Wheel power while driving between tiles.
    medium_speed: i32,

    /// Wheel power while turning on the spot.
    slow_speed: i32,

    /// Drive wheel radius (cm), used to convert distance to encoder degrees.
    wheel_radius_cm: f32,

    /// Quarter turn (degrees).
    turn_angle_deg: f32,

    /// Half turn (degrees).
    turn_around_deg: f32,

    /// Pause after each gyro reset so the sensor settles (ms).
    settle_delay_ms: u64,

    /// How long a tile is watched for the player's color (ms).
    scan_window_ms: u64,

    /// Dispenser encoder target for one piece.
    rotation_count: i64,

    /// Dispenser motor power.
    dispense_speed: i32,

    /// Pause after every tile driven (ms).
    post_tile_wait_ms: u64,

    /// Watchdog deadline for a single drive, turn or dispense (ms).
    motion_timeout_ms: u64,

    /// Sleep between two polls of a sensor (ms).
    poll_interval_ms: u64,

    /// Color the player's pieces are detected as.
    player_color: ColorClass,

    /// Seed for the robot's move choice; entropy when absent.
    rng_seed: Option<u64>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            tile_size_cm: 14.5,
            medium_speed: 50,
            slow_speed: 10,
            wheel_radius_cm: 2.75,
            turn_angle_deg: 90.0,
            turn_around_deg: 180.0,
            settle_delay_ms: 50,
            scan_window_ms: 1000,
            rotation_count: 100,
            dispense_speed: 5,
            post_tile_wait_ms: 500,
            motion_timeout_ms: 10_000,
            poll_interval_ms: 1,
            player_color: ColorClass::Red,
            rng_seed: None,
        }
    }
}

impl RobotConfig {
    /// Loads configuration from a TOML file; missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Rejects values the motion code cannot work with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size_cm > 0.0) || !(self.wheel_radius_cm > 0.0) {
            return Err(ConfigError::new(
                "tile_size_cm and wheel_radius_cm must be positive".to_string(),
            ));
        }
        if self.medium_speed <= 0 || self.slow_speed <= 0 || self.dispense_speed <= 0 {
            return Err(ConfigError::new("motor speeds must be positive".to_string()));
        }
        if !(self.turn_angle_deg > 0.0) || !(self.turn_around_deg > 0.0) {
            return Err(ConfigError::new("turn angles must be positive".to_string()));
        }
        if self.rotation_count <= 0 {
            return Err(ConfigError::new("rotation_count must be positive".to_string()));
        }
        if self.motion_timeout_ms == 0 || self.poll_interval_ms == 0 {
            return Err(ConfigError::new(
                "motion_timeout_ms and poll_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Wheel encoder degrees per centimetre driven.
    pub fn encoder_ticks_per_cm(&self) -> f32 {
        180.0 / (PI * self.wheel_radius_cm)
    }

    /// Wheel encoder target for one tile.
    pub fn tile_ticks(&self) -> i64 {
        (self.tile_size_cm * self.encoder_ticks_per_cm()).round() as i64
    }

    /// Gyro settle delay.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Scan window per tile.
    pub fn scan_window(&self) -> Duration {
        Duration::from_millis(self.scan_window_ms)
    }

    /// Pause after each tile.
    pub fn post_tile_wait(&self) -> Duration {
        Duration::from_millis(self.post_tile_wait_ms)
    }

    /// Watchdog deadline per motion primitive.
    pub fn motion_timeout(&self) -> Duration {
        Duration::from_millis(self.motion_timeout_ms)
    }

    /// Sleep between two sensor polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
