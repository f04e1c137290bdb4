//! Obstacles - bugs that crawl across the stone lanes
//!
//! An obstacle only ever moves right. Once it crawls off the far edge it restarts
//! off-grid left in a fresh random lane at a fresh random speed.

use serde::{Deserialize, Serialize};

use super::entity::{Cell, Entity, EntityKind, TickContext};
use super::rng::RandomSource;
use crate::consts::OBSTACLE_START_COL;
use crate::tuning::Tuning;

/// Footprint offsets: a bug must be a third of the way into a cell before it hits there
const TAIL_OFFSET: f32 = 1.0 / 3.0;
const HEAD_OFFSET: f32 = 2.0 / 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub row: i32,
    /// Fractional column; -1 while waiting off-grid
    pub col: f32,
    /// Cells per second, always > 0
    pub speed: f32,
}

impl Obstacle {
    /// Create an obstacle already reset into a random lane
    pub fn new(id: u32, rng: &mut dyn RandomSource, tuning: &Tuning) -> Self {
        let mut obstacle = Self {
            id,
            row: tuning.band_first_row,
            col: OBSTACLE_START_COL,
            speed: tuning.obstacle_speed.min,
        };
        obstacle.reset(rng, tuning);
        obstacle
    }

    /// Pick a new lane and speed and park off-grid left
    pub fn reset(&mut self, rng: &mut dyn RandomSource, tuning: &Tuning) {
        self.row = rng.next_between(tuning.band_first_row, tuning.band_last_row);
        self.col = OBSTACLE_START_COL;
        self.speed = tuning.obstacle_speed.lerp(rng.next_unit());
    }

    /// Move along the lane, wrapping back to the start once past the last column
    pub fn advance(&mut self, dt: f32, rng: &mut dyn RandomSource, tuning: &Tuning) {
        self.col += self.speed * dt;
        if self.col > tuning.cols as f32 {
            self.reset(rng, tuning);
        }
    }

    /// Cell the tail end is counted in
    #[inline]
    pub fn tail_col(&self) -> i32 {
        (self.col + TAIL_OFFSET).floor() as i32
    }

    /// Cell the head end is counted in
    #[inline]
    pub fn head_col(&self) -> i32 {
        (self.col + HEAD_OFFSET).floor() as i32
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }

    fn cell(&self) -> Option<Cell> {
        Some(Cell::new(self.row, self.col.floor() as i32))
    }

    fn update(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        self.advance(dt, ctx.rng, ctx.tuning);
    }

    fn occupies(&self, col: i32, row: i32) -> bool {
        row == self.row && (col == self.tail_col() || col == self.head_col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::Scripted;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn at(row: i32, col: f32) -> Obstacle {
        Obstacle {
            id: 1,
            row,
            col,
            speed: 2.0,
        }
    }

    fn assert_reset(o: &Obstacle, tuning: &Tuning) {
        assert_eq!(o.col, OBSTACLE_START_COL);
        assert!(tuning.in_band(o.row), "row {} outside band", o.row);
        assert!(tuning.obstacle_speed.contains(o.speed), "speed {}", o.speed);
    }

    #[test]
    fn test_new_is_reset() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..50 {
            assert_reset(&Obstacle::new(id, &mut rng, &tuning), &tuning);
        }
    }

    #[test]
    fn test_reset_uses_scripted_draws() {
        let tuning = Tuning::default();
        let mut rng = Scripted::new([0.9, 0.5]);
        let o = Obstacle::new(1, &mut rng, &tuning);
        assert_eq!(o.row, 3);
        assert!((o.speed - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_occupies_at_zero() {
        let o = at(2, 0.0);
        assert!(o.occupies(0, 2));
        assert!(!o.occupies(1, 2));
        assert!(!o.occupies(0, 1));
    }

    #[test]
    fn test_occupies_at_2_4() {
        // tail = floor(2.733) = 2, head = floor(3.066) = 3
        let o = at(1, 2.4);
        assert!(o.occupies(2, 1));
        assert!(o.occupies(3, 1));
        assert!(!o.occupies(1, 1));
        assert!(!o.occupies(4, 1));
        assert!(!o.occupies(2, 2));
    }

    #[test]
    fn test_occupies_at_4_999() {
        // tail = floor(5.332) = 5, head = floor(5.665) = 5: already past the last column
        let o = at(3, 4.999);
        assert!(o.occupies(5, 3));
        assert!(!o.occupies(4, 3));
    }

    #[test]
    fn test_offgrid_sentinel_occupies_nothing_on_grid() {
        let o = at(1, -1.0);
        for col in 0..5 {
            assert!(!o.occupies(col, 1));
        }
    }

    #[test]
    fn test_wraps_past_last_column() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut o = at(2, 4.9);
        o.advance(0.1, &mut rng, &tuning);
        assert_reset(&o, &tuning);
    }

    #[test]
    fn test_exactly_cols_does_not_wrap() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut o = at(2, 4.0);
        o.advance(0.5, &mut rng, &tuning);
        assert_eq!(o.col, 5.0);
        assert_eq!(o.row, 2);
    }

    proptest! {
        #[test]
        fn prop_motion_is_linear_or_reset(
            col in -1.0f32..5.0,
            speed in 1.5f32..4.5,
            dt in 0.0f32..0.5,
            seed in any::<u64>(),
        ) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut o = Obstacle { id: 1, row: 2, col, speed };
            let expected = col + speed * dt;
            o.advance(dt, &mut rng, &tuning);
            if expected > tuning.cols as f32 {
                prop_assert_eq!(o.col, OBSTACLE_START_COL);
                prop_assert!(tuning.in_band(o.row));
                prop_assert!(tuning.obstacle_speed.contains(o.speed));
            } else {
                prop_assert_eq!(o.col, expected);
                prop_assert_eq!(o.row, 2);
            }
        }
    }
}
