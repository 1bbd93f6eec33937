//! Tile perception by timed color sampling.

use crate::config::RobotConfig;
use crate::hardware::{Clock, ColorClass, Sensing};
use derive_new::new;
use std::time::Duration;
use tictacbot_board::{Cell, Mark};
use tracing::{debug, instrument};

/// Watches one tile for a fixed window and decides whether the player marked it.
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct TileScanner {
    window: Duration,
    poll_interval: Duration,
    player_color: ColorClass,
}

impl TileScanner {
    /// Scanner using the configured window, poll interval and player color.
    pub fn from_config(config: &RobotConfig) -> Self {
        Self::new(
            config.scan_window(),
            config.poll_interval(),
            *config.player_color(),
        )
    }

    /// Samples the color sensor until the window closes.
    ///
    /// Returns `Some(Mark::Player)` if any sample showed the player color.
    /// Sampling continues to the end of the window regardless, and never
    /// sleeps past it. `cell` is only used for logging; the caller must
    /// not scan tiles that already hold a mark.
    #[instrument(skip(self, sensors))]
    pub fn scan<S>(&self, cell: Cell, sensors: &mut S) -> Option<Mark>
    where
        S: Sensing + Clock + ?Sized,
    {
        let start = sensors.elapsed();
        let mut samples = 0u32;
        let mut hits = 0u32;

        loop {
            let waited = sensors.elapsed().saturating_sub(start);
            if waited >= self.window {
                break;
            }
            if sensors.sample_color() == self.player_color {
                hits += 1;
            }
            samples += 1;
            sensors.sleep(self.poll_interval.min(self.window - waited));
        }

        debug!(%cell, samples, hits, "Tile scanned");
        (hits > 0).then_some(Mark::Player)
    }
}
