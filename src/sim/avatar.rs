//! The player's avatar
//!
//! Moves one whole cell per accepted command and is clamped to the grid on every axis.
//! Score and lives live here; the round decides when they change.

use serde::{Deserialize, Serialize};

use super::entity::{Cell, Entity, EntityKind};
use super::event::GameEvent;
use crate::tuning::Tuning;

/// Discrete input commands the core accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Cycle the avatar's character sprite (cosmetic only)
    CycleSprite,
}

impl Command {
    /// Translate a host key name into a command; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Command::Up),
            "down" | "arrowdown" | "s" => Some(Command::Down),
            "left" | "arrowleft" | "a" => Some(Command::Left),
            "right" | "arrowright" | "d" => Some(Command::Right),
            "space" | " " | "c" => Some(Command::CycleSprite),
            _ => None,
        }
    }

    /// Row/column step for directional commands
    fn delta(self) -> Option<(i32, i32)> {
        match self {
            Command::Up => Some((-1, 0)),
            Command::Down => Some((1, 0)),
            Command::Left => Some((0, -1)),
            Command::Right => Some((0, 1)),
            Command::CycleSprite => None,
        }
    }
}

/// Character sprites the avatar can wear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvatarSprite {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    Princess,
}

impl AvatarSprite {
    pub const ALL: [AvatarSprite; 5] = [
        AvatarSprite::Boy,
        AvatarSprite::CatGirl,
        AvatarSprite::HornGirl,
        AvatarSprite::PinkGirl,
        AvatarSprite::Princess,
    ];

    /// Image key for the renderer
    pub fn image_key(&self) -> &'static str {
        match self {
            AvatarSprite::Boy => "images/char-boy.png",
            AvatarSprite::CatGirl => "images/char-cat-girl.png",
            AvatarSprite::HornGirl => "images/char-horn-girl.png",
            AvatarSprite::PinkGirl => "images/char-pink-girl.png",
            AvatarSprite::Princess => "images/char-princess-girl.png",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub row: i32,
    pub col: i32,
    pub score: u64,
    pub lives: u32,
    pub sprite: AvatarSprite,
    // Copied from tuning so input handling needs no context
    rows: i32,
    cols: i32,
    home: Cell,
    max_lives: u32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        let home = Cell::new(tuning.player_row, tuning.player_col);
        Self {
            row: home.row,
            col: home.col,
            score: 0,
            lives: tuning.max_lives,
            sprite: AvatarSprite::default(),
            rows: tuning.rows,
            cols: tuning.cols,
            home,
            max_lives: tuning.max_lives,
        }
    }

    #[inline]
    pub fn position(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    #[inline]
    pub fn home(&self) -> Cell {
        self.home
    }

    /// Put the avatar back on its starting cell
    pub fn reset_position(&mut self) {
        self.row = self.home.row;
        self.col = self.home.col;
    }

    /// Full restore for a new round (lives, score, position). The sprite choice survives.
    pub fn reset(&mut self) {
        self.lives = self.max_lives;
        self.score = 0;
        self.reset_position();
    }

    /// Standing on the destination row
    #[inline]
    pub fn at_destination(&self) -> bool {
        self.row <= 0
    }

    /// Apply one command. Returns the signal to emit, or `None` if nothing happened.
    ///
    /// Moves are a single clamped cell; bumping into an edge still counts as accepted.
    pub fn handle_input(&mut self, command: Command) -> Option<GameEvent> {
        match command.delta() {
            Some((dr, dc)) => {
                self.row = (self.row + dr).clamp(0, self.rows - 1);
                self.col = (self.col + dc).clamp(0, self.cols - 1);
                Some(GameEvent::MoveAccepted {
                    row: self.row,
                    col: self.col,
                })
            }
            None => {
                self.sprite = self.sprite.next();
                Some(GameEvent::CosmeticToggled { sprite: self.sprite })
            }
        }
    }

    /// Lose one life and go home. The event reports the lives left; zero means round over.
    pub fn lose_life(&mut self) -> GameEvent {
        self.lives = self.lives.saturating_sub(1);
        self.reset_position();
        GameEvent::LifeLost {
            lives_remaining: self.lives,
        }
    }

    #[inline]
    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Add points. `bonus_item` only picks which signal to emit.
    pub fn collect_points(&mut self, amount: u32, bonus_item: bool) -> GameEvent {
        self.score += u64::from(amount);
        if bonus_item {
            GameEvent::BonusCollected {
                points: amount,
                score: self.score,
            }
        } else {
            GameEvent::DestinationReached {
                points: amount,
                score: self.score,
            }
        }
    }
}

impl Entity for Avatar {
    fn kind(&self) -> EntityKind {
        EntityKind::Avatar
    }

    fn cell(&self) -> Option<Cell> {
        Some(self.position())
    }
}
