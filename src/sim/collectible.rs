//! Collectibles - gems that blink in and out of the stone lanes
//!
//! A gem alternates between hidden and visible on random countdowns. Its cell is picked
//! while it is hidden, away from the avatar and any visible gem. When no free cell turns
//! up within the trial bound the gem stays hidden for another round of the countdown and
//! tries again when it next wants to show.

use serde::{Deserialize, Serialize};

use super::entity::{Cell, Entity, EntityKind, TickContext};
use crate::tuning::Tuning;

/// Gem color, one per point tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GemColor {
    #[default]
    Blue,
    Green,
    Orange,
}

impl GemColor {
    /// Color for a tier index (0 = low, 1 = mid, 2 = high)
    pub fn from_tier(tier: usize) -> Self {
        match tier {
            0 => GemColor::Blue,
            1 => GemColor::Green,
            _ => GemColor::Orange,
        }
    }

    /// Image key for the renderer
    pub fn image_key(&self) -> &'static str {
        match self {
            GemColor::Blue => "images/Gem Blue.png",
            GemColor::Green => "images/Gem Green.png",
            GemColor::Orange => "images/Gem Orange.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub visible: bool,
    /// Seconds until the next show/hide flip; may dip below zero for one tick
    pub timer: f32,
    pub points: u32,
    pub color: GemColor,
    /// Reserved cell; `None` when the last placement found no room
    pub spot: Option<Cell>,
}

impl Collectible {
    /// Create a hidden gem with a fresh countdown and spot
    pub fn new(id: u32, ctx: &mut TickContext<'_>) -> Self {
        let mut gem = Self {
            id,
            visible: false,
            timer: 0.0,
            points: ctx.tuning.point_tiers[0],
            color: GemColor::Blue,
            spot: None,
        };
        gem.reset(ctx);
        gem
    }

    /// Hide, roll a new countdown and value, and pick a new spot
    pub fn reset(&mut self, ctx: &mut TickContext<'_>) {
        self.reroll_hidden(ctx);
        self.place(ctx);
    }

    /// Become visible for a random duration
    pub fn show(&mut self, ctx: &mut TickContext<'_>) {
        // A previous placement ran out of trials; try again before showing
        if self.spot.is_none() && !self.place(ctx) {
            return;
        }
        self.visible = true;
        self.timer = ctx.tuning.visible_secs.lerp(ctx.rng.next_unit());
    }

    /// Try up to `placement_trials` random band cells that nothing in `ctx.view` holds.
    ///
    /// Returns `true` on success. On failure the gem is re-rolled as hidden with no spot,
    /// deferring placement to its next show.
    pub fn place(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let tuning = ctx.tuning;
        for _ in 0..tuning.placement_trials {
            let row = ctx
                .rng
                .next_between(tuning.band_first_row, tuning.band_last_row);
            let col = ctx.rng.next_index(tuning.cols as usize) as i32;
            let cell = Cell::new(row, col);
            if !ctx.view.is_taken(cell) {
                self.spot = Some(cell);
                return true;
            }
        }
        log::trace!(
            "Gem {} found no free cell in {} trials, deferring",
            self.id,
            tuning.placement_trials
        );
        self.reroll_hidden(ctx);
        false
    }

    /// Pick up the gem: returns its value and hides it immediately
    pub fn collect(&mut self, ctx: &mut TickContext<'_>) -> u32 {
        let points = self.points;
        self.reset(ctx);
        points
    }

    fn reroll_hidden(&mut self, ctx: &mut TickContext<'_>) {
        self.visible = false;
        self.spot = None;
        self.timer = ctx.tuning.hidden_secs.lerp(ctx.rng.next_unit());
        let tier = pick_tier(ctx.rng.next_unit(), ctx.tuning);
        self.points = ctx.tuning.point_tiers[tier];
        self.color = GemColor::from_tier(tier);
    }
}

/// Weighted tier pick from a unit sample (default 50/30/20)
fn pick_tier(unit: f32, tuning: &Tuning) -> usize {
    let roll = unit * 100.0;
    let mut cumulative = 0.0;
    for (tier, weight) in tuning.point_weights.iter().enumerate() {
        cumulative += *weight as f32;
        if roll < cumulative {
            return tier;
        }
    }
    tuning.point_weights.len() - 1
}

impl Entity for Collectible {
    fn kind(&self) -> EntityKind {
        EntityKind::Collectible
    }

    fn cell(&self) -> Option<Cell> {
        if self.visible { self.spot } else { None }
    }

    fn update(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        self.timer -= dt;
        if self.timer > 0.0 {
            return;
        }
        if self.visible {
            self.reset(ctx);
        } else {
            self.show(ctx);
        }
    }
}
