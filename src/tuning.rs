//! Data-driven game balance
//!
//! Every knob the simulation reads lives here. Defaults mirror [`crate::consts`];
//! a JSON document only needs to name the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("range `{name}` is invalid: min {min} must be > 0 and below max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("restricted band rows {first}..={last} do not fit strictly inside a {rows}-row grid")]
    EmptyBand { first: i32, last: i32, rows: i32 },
    #[error("grid must be at least 3x1 cells, got {rows}x{cols}")]
    InvalidGrid { rows: i32, cols: i32 },
    #[error("start cell ({row}, {col}) is outside the grid or inside the band")]
    InvalidStart { row: i32, col: i32 },
    #[error("point weights must sum to 100, got {0}")]
    InvalidWeights(u32),
}

/// A `[min, max]` range of seconds or cells per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in [0, 1) into the span
    #[inline]
    pub fn lerp(&self, unit: f32) -> f32 {
        self.min + unit * (self.max - self.min)
    }

    /// Inclusive at both ends: `lerp` of a sample just under 1 can round up to `max`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), TuningError> {
        if self.min > 0.0 && self.min < self.max {
            Ok(())
        } else {
            Err(TuningError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Complete tuning set for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    pub rows: i32,
    pub cols: i32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub player_row: i32,
    pub player_col: i32,
    /// First and last row (inclusive) of the restricted middle band
    pub band_first_row: i32,
    pub band_last_row: i32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_speed: Span,

    // === Collectibles ===
    pub collectible_count: usize,
    pub hidden_secs: Span,
    pub visible_secs: Span,
    pub point_tiers: [u32; 3],
    pub point_weights: [u32; 3],
    pub placement_trials: u32,

    // === Scoring ===
    pub max_lives: u32,
    pub water_bonus: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            player_row: PLAYER_ROW,
            player_col: PLAYER_COL,
            band_first_row: BAND_FIRST_ROW,
            band_last_row: BAND_LAST_ROW,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_speed: Span::new(OBSTACLE_MIN_SPEED, OBSTACLE_MAX_SPEED),

            collectible_count: COLLECTIBLE_COUNT,
            hidden_secs: Span::new(HIDDEN_MIN_SECS, HIDDEN_MAX_SECS),
            visible_secs: Span::new(VISIBLE_MIN_SECS, VISIBLE_MAX_SECS),
            point_tiers: POINT_TIERS,
            point_weights: POINT_WEIGHTS,
            placement_trials: PLACEMENT_TRIALS,

            max_lives: MAX_LIVES,
            water_bonus: WATER_BONUS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {}x{} grid, {} obstacles, {} gems",
            tuning.rows,
            tuning.cols,
            tuning.obstacle_count,
            tuning.collectible_count
        );
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.rows < 3 || self.cols < 1 {
            return Err(TuningError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        // Band must leave the destination row and at least one home row free
        if self.band_first_row < 1
            || self.band_last_row < self.band_first_row
            || self.band_last_row > self.rows - 2
        {
            return Err(TuningError::EmptyBand {
                first: self.band_first_row,
                last: self.band_last_row,
                rows: self.rows,
            });
        }
        if !self.contains(self.player_row, self.player_col)
            || self.in_band(self.player_row)
            || self.player_row == 0
        {
            return Err(TuningError::InvalidStart {
                row: self.player_row,
                col: self.player_col,
            });
        }
        self.obstacle_speed.validate("obstacle_speed")?;
        self.hidden_secs.validate("hidden_secs")?;
        self.visible_secs.validate("visible_secs")?;
        let weight_sum: u32 = self.point_weights.iter().sum();
        if weight_sum != 100 {
            return Err(TuningError::InvalidWeights(weight_sum));
        }
        Ok(())
    }

    #[inline]
    pub fn in_band(&self, row: i32) -> bool {
        row >= self.band_first_row && row <= self.band_last_row
    }

    /// Whether a cell lies on the grid
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }
}
