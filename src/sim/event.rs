//! Signals the core emits for sound and overlay collaborators

use serde::{Deserialize, Serialize};

use super::avatar::AvatarSprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A directional command moved (or bumped) the avatar
    MoveAccepted { row: i32, col: i32 },
    /// The avatar changed character
    CosmeticToggled { sprite: AvatarSprite },
    /// A gem was picked up
    BonusCollected { points: u32, score: u64 },
    /// The avatar reached the water
    DestinationReached { points: u32, score: u64 },
    /// An obstacle caught the avatar
    LifeLost { lives_remaining: u32 },
    /// Last life gone; the round is frozen until reset
    GameOver { final_score: u64 },
    /// A full reset started a fresh round
    RoundReset,
}
