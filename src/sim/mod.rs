//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, funneled through [`RandomSource`]
//! - Stable iteration order (entities stay in their construction order)
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collectible;
pub mod entity;
pub mod event;
pub mod obstacle;
pub mod rng;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, AvatarSprite, Command};
pub use collectible::{Collectible, GemColor};
pub use entity::{Cell, Entity, EntityKind, OccupancyView, TickContext};
pub use event::GameEvent;
pub use obstacle::Obstacle;
pub use rng::RandomSource;
pub use state::{RoundPhase, RoundState};
pub use tick::tick;
