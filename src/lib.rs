//! Lane Dash - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, round state)
//! - `tuning`: Data-driven game balance
//! - `render`: Draw list and HUD snapshot for an external renderer
//! - `audio`: Event-to-sound cue mapping for an external player
//! - `session`: Host-facing frame driver

pub mod audio;
pub mod highscores;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions
    pub const ROWS: i32 = 6;
    pub const COLS: i32 = 5;

    /// Cell size in pixels (sprite art is laid out on this pitch)
    pub const CELL_WIDTH: f32 = 101.0;
    pub const CELL_HEIGHT: f32 = 83.0;

    /// Avatar starting cell (bottom grass row, middle column)
    pub const PLAYER_ROW: i32 = 5;
    pub const PLAYER_COL: i32 = 2;
    /// Destination row (the water)
    pub const DESTINATION_ROW: i32 = 0;

    /// Restricted middle band (stone rows) where obstacles and gems live
    pub const BAND_FIRST_ROW: i32 = 1;
    pub const BAND_LAST_ROW: i32 = 3;

    /// Obstacles
    pub const OBSTACLE_COUNT: usize = 3;
    /// Off-grid-left column an obstacle restarts from
    pub const OBSTACLE_START_COL: f32 = -1.0;
    /// Obstacle speed range in cells per second [min, max)
    pub const OBSTACLE_MIN_SPEED: f32 = 1.5;
    pub const OBSTACLE_MAX_SPEED: f32 = 4.5;

    /// Collectibles
    pub const COLLECTIBLE_COUNT: usize = 3;
    /// Seconds a gem stays hidden [min, max)
    pub const HIDDEN_MIN_SECS: f32 = 2.0;
    pub const HIDDEN_MAX_SECS: f32 = 6.0;
    /// Seconds a gem stays visible [min, max)
    pub const VISIBLE_MIN_SECS: f32 = 3.0;
    pub const VISIBLE_MAX_SECS: f32 = 6.0;
    /// Gem point tiers (low, mid, high)
    pub const POINT_TIERS: [u32; 3] = [100, 250, 500];
    /// Percent chance of each tier; must sum to 100
    pub const POINT_WEIGHTS: [u32; 3] = [50, 30, 20];
    /// Random placement attempts before deferring
    pub const PLACEMENT_TRIALS: u32 = 10;

    /// Lives at round start
    pub const MAX_LIVES: u32 = 3;
    /// Points for reaching the water
    pub const WATER_BONUS: u32 = 100;

    /// Longest frame delta the session feeds into a tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal frame delta for headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Convert a grid position to the top-left pixel of its sprite.
///
/// Sprites are taller than a cell, so they are lifted by a quarter row to sit on their tile.
#[inline]
pub fn cell_to_screen(row: f32, col: f32, cell_width: f32, cell_height: f32) -> Vec2 {
    Vec2::new(col * cell_width, row * cell_height - cell_height / 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_screen() {
        let p = cell_to_screen(5.0, 2.0, consts::CELL_WIDTH, consts::CELL_HEIGHT);
        assert!((p.x - 202.0).abs() < 0.001);
        assert!((p.y - (415.0 - 20.75)).abs() < 0.001);
    }

    #[test]
    fn test_point_weights_sum_to_100() {
        assert_eq!(consts::POINT_WEIGHTS.iter().sum::<u32>(), 100);
    }
}
