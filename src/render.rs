//! Render sink interface
//!
//! The core never draws. It hands a renderer a paint-ordered list of sprites with their
//! grid and pixel positions, plus a HUD snapshot for the score line and game-over dialog.

use glam::Vec2;
use serde::Serialize;

use crate::cell_to_screen;
use crate::sim::{
    AvatarSprite, Entity, EntityKind, GemColor, RandomSource, RoundPhase, RoundState,
};

/// Image key for the bug sprite
pub const OBSTACLE_IMAGE: &str = "images/enemy-bug.png";

/// One sprite to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: EntityKind,
    pub image: &'static str,
    pub row: i32,
    /// Fractional for obstacles mid-lane
    pub col: f32,
    /// Top-left pixel of the image
    pub pos: Vec2,
}

/// Score line and overlay state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub sprite: AvatarSprite,
    pub phase: RoundPhase,
    /// Present once the round is over, for the game-over dialog
    pub final_score: Option<u64>,
}

/// Sprites in paint order: gems, then bugs, then the avatar on top
pub fn draw_list<R: RandomSource>(round: &RoundState<R>) -> Vec<Sprite> {
    let tuning = &round.tuning;
    let sprite = |kind: EntityKind, image: &'static str, row: i32, col: f32| Sprite {
        kind,
        image,
        row,
        col,
        pos: cell_to_screen(row as f32, col, tuning.cell_width, tuning.cell_height),
    };

    let mut sprites = Vec::with_capacity(round.obstacles.len() + round.collectibles.len() + 1);
    for gem in &round.collectibles {
        if let Some(cell) = gem.cell() {
            sprites.push(sprite(
                gem.kind(),
                gem.color.image_key(),
                cell.row,
                cell.col as f32,
            ));
        }
    }
    for bug in &round.obstacles {
        sprites.push(sprite(bug.kind(), OBSTACLE_IMAGE, bug.row, bug.col));
    }
    let avatar = &round.avatar;
    sprites.push(sprite(
        avatar.kind(),
        avatar.sprite.image_key(),
        avatar.row,
        avatar.col as f32,
    ));
    sprites
}

pub fn hud<R: RandomSource>(round: &RoundState<R>) -> Hud {
    Hud {
        score: round.avatar.score,
        lives: round.avatar.lives,
        sprite: round.avatar.sprite,
        phase: round.phase(),
        final_score: round.final_score(),
    }
}

/// Plain-text frame for headless hosts and logs.
///
/// `~` water, `=` stone, `"` grass, `B` bug, `*`/`+`/`$` gems by tier, `@` avatar.
pub fn text_frame<R: RandomSource>(round: &RoundState<R>) -> String {
    let tuning = &round.tuning;
    let cols = tuning.cols as usize;
    let mut grid: Vec<Vec<char>> = (0..tuning.rows)
        .map(|row| {
            let ground = if row == 0 {
                '~'
            } else if tuning.in_band(row) {
                '='
            } else {
                '"'
            };
            vec![ground; cols]
        })
        .collect();

    let mut put = |row: i32, col: i32, ch: char| {
        if tuning.contains(row, col) {
            grid[row as usize][col as usize] = ch;
        }
    };
    for gem in round.visible_collectibles() {
        if let Some(cell) = gem.cell() {
            let glyph = match gem.color {
                GemColor::Blue => '*',
                GemColor::Green => '+',
                GemColor::Orange => '$',
            };
            put(cell.row, cell.col, glyph);
        }
    }
    for bug in &round.obstacles {
        put(bug.row, bug.tail_col(), 'B');
        put(bug.row, bug.head_col(), 'B');
    }
    put(round.avatar.row, round.avatar.col, '@');

    let mut out = String::with_capacity((cols + 1) * tuning.rows as usize);
    for line in grid {
        out.extend(line);
        out.push('\n');
    }
    out
}
