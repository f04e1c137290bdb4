//! Round state
//!
//! The round owns every entity and is the only thing that mutates them. Nothing holds a
//! reference back to it; entities see each other only through an [`OccupancyView`]
//! built for the call that needs it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::avatar::{Avatar, Command};
use super::collectible::Collectible;
use super::entity::{Entity, OccupancyView, TickContext};
use super::event::GameEvent;
use super::obstacle::Obstacle;
use super::rng::RandomSource;
use crate::tuning::{Tuning, TuningError};

/// Where the round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// Out of lives; frozen until an explicit reset
    GameOver,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct RoundState<R: RandomSource = Pcg32> {
    pub tuning: Tuning,
    /// Set on game over, cleared only by [`RoundState::reset`]
    pub paused: bool,
    pub avatar: Avatar,
    /// Fixed count, stable order
    pub obstacles: Vec<Obstacle>,
    /// Fixed count, stable order
    pub collectibles: Vec<Collectible>,
    /// Ticks simulated since the round started
    pub time_ticks: u64,
    /// Pending signals, kept until drained
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: R,
}

impl RoundState<Pcg32> {
    /// Create a round with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), Pcg32::seed_from_u64(seed))
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> RoundState<R> {
    /// Create a round drawing every random choice from `rng`.
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn with_rng(tuning: Tuning, rng: R) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, rng))
    }

    /// `tuning` must already be valid
    fn build(tuning: Tuning, mut rng: R) -> Self {
        let avatar = Avatar::new(&tuning);
        let obstacles = (0..tuning.obstacle_count as u32)
            .map(|id| Obstacle::new(id, &mut rng, &tuning))
            .collect();

        // Fresh gems start hidden, so only the avatar constrains their first spot
        let mut view = OccupancyView::new();
        view.extend_from(&avatar);
        let mut ctx = TickContext {
            rng: &mut rng,
            tuning: &tuning,
            view: &view,
        };
        let collectibles = (0..tuning.collectible_count as u32)
            .map(|id| Collectible::new(id, &mut ctx))
            .collect();

        log::info!(
            "New round: {} obstacles, {} gems, {} lives",
            tuning.obstacle_count,
            tuning.collectible_count,
            tuning.max_lives
        );

        Self {
            tuning,
            paused: false,
            avatar,
            obstacles,
            collectibles,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.paused {
            RoundPhase::GameOver
        } else {
            RoundPhase::Playing
        }
    }

    /// Final score for the game-over overlay, once the round has ended
    pub fn final_score(&self) -> Option<u64> {
        self.paused.then_some(self.avatar.score)
    }

    /// Apply a command to the avatar immediately. Ignored while the round is over.
    pub fn handle_input(&mut self, command: Command) {
        if self.paused {
            return;
        }
        if let Some(event) = self.avatar.handle_input(command) {
            self.events.push(event);
        }
    }

    /// Full reset: fresh lives, score and position, every entity re-rolled
    pub fn reset(&mut self) {
        self.paused = false;
        self.time_ticks = 0;
        self.avatar.reset();
        for obstacle in &mut self.obstacles {
            obstacle.reset(&mut self.rng, &self.tuning);
        }
        for idx in 0..self.collectibles.len() {
            let view = self.placement_view(idx);
            let mut ctx = TickContext {
                rng: &mut self.rng,
                tuning: &self.tuning,
                view: &view,
            };
            self.collectibles[idx].reset(&mut ctx);
        }
        self.events.push(GameEvent::RoundReset);
        log::info!("Round reset");
    }

    /// Take every event emitted since the last drain.
    ///
    /// Events pile up across ticks until drained; a host ticking the round directly
    /// should call this once per frame. [`crate::Session::frame`] does.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Cells a gem must avoid: the avatar and every other visible gem
    pub(crate) fn placement_view(&self, skip: usize) -> OccupancyView {
        let others = self
            .collectibles
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != skip)
            .map(|(_, gem)| gem);
        let mut view = OccupancyView::from_occupants(others);
        view.extend_from(&self.avatar);
        view
    }

    /// Freeze the round and surface the final score
    pub(crate) fn end_round(&mut self) {
        self.paused = true;
        let final_score = self.avatar.score;
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over - final score {}", final_score);
    }

    /// Visible gems, for renderers
    pub fn visible_collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|gem| gem.visible)
    }

    /// Whether any obstacle currently covers the avatar's cell
    pub fn avatar_threatened(&self) -> bool {
        let here = self.avatar.position();
        self.obstacles.iter().any(|o| o.covers(here))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Cell;
    use crate::sim::rng::Scripted;
    use crate::sim::{GemColor, Obstacle, tick};

    #[test]
    fn test_new_round_layout() {
        let round = RoundState::new(12345);
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert_eq!(round.obstacles.len(), 3);
        assert_eq!(round.collectibles.len(), 3);
        assert_eq!(round.avatar.position(), Cell::new(5, 2));
        assert!(round.visible_collectibles().next().is_none());
        assert_eq!(round.final_score(), None);
    }

    #[test]
    fn test_input_ignored_when_over() {
        let mut round = RoundState::new(1);
        round.end_round();
        round.drain_events();
        round.handle_input(Command::Up);
        assert_eq!(round.avatar.position(), Cell::new(5, 2));
        assert!(round.events().is_empty());
    }

    #[test]
    fn test_input_emits_event() {
        let mut round = RoundState::new(1);
        round.handle_input(Command::Left);
        assert_eq!(
            round.drain_events(),
            vec![GameEvent::MoveAccepted { row: 5, col: 1 }]
        );
        assert!(round.events().is_empty());
    }

    #[test]
    fn test_placement_view_skips_self_and_hidden() {
        let mut round = RoundState::new(3);
        round.collectibles[1].visible = true;
        round.collectibles[1].spot = Some(Cell::new(2, 4));
        let view = round.placement_view(0);
        assert!(view.is_taken(Cell::new(5, 2)));
        assert!(view.is_taken(Cell::new(2, 4)));
        assert_eq!(view.len(), 2);

        let own = round.placement_view(1);
        assert!(!own.is_taken(Cell::new(2, 4)));
    }

    #[test]
    fn test_custom_tuning_counts() {
        let tuning = Tuning {
            obstacle_count: 5,
            collectible_count: 1,
            max_lives: 7,
            ..Default::default()
        };
        let round = RoundState::with_tuning(tuning, 8).unwrap();
        assert_eq!(round.obstacles.len(), 5);
        assert_eq!(round.collectibles.len(), 1);
        assert_eq!(round.avatar.lives, 7);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            cols: 0,
            ..Default::default()
        };
        let err = RoundState::with_tuning(tuning, 1).unwrap_err();
        assert!(matches!(err, TuningError::InvalidGrid { rows: 6, cols: 0 }));

        let tuning = Tuning {
            band_last_row: 9,
            ..Default::default()
        };
        assert!(RoundState::with_rng(tuning, Scripted::new([0.5])).is_err());
    }

    #[test]
    fn test_scripted_source_drives_layout() {
        let tuning = Tuning {
            obstacle_count: 2,
            collectible_count: 1,
            ..Default::default()
        };
        // bug 0: lane, speed | bug 1: lane, speed | gem: hidden secs, tier, row, col
        let script = [0.5, 0.5, 0.9, 0.0, 0.5, 0.6, 0.7, 0.5];
        let mut round = RoundState::with_rng(tuning, Scripted::new(script)).unwrap();

        let check = |round: &RoundState<Scripted>| {
            assert_eq!((round.obstacles[0].row, round.obstacles[0].speed), (2, 3.0));
            assert_eq!((round.obstacles[1].row, round.obstacles[1].speed), (3, 1.5));
            assert!(round.obstacles.iter().all(|o| o.col == -1.0));

            let gem = &round.collectibles[0];
            assert!(!gem.visible);
            assert_eq!(gem.timer, 4.0);
            assert_eq!((gem.points, gem.color), (250, GemColor::Green));
            assert_eq!(gem.spot, Some(Cell::new(3, 2)));
        };
        check(&round);

        // No draws while nothing wraps or flips
        tick(&mut round, 0.5);
        assert_eq!(round.obstacles[0].col, 0.5);
        assert_eq!(round.obstacles[1].col, -0.25);
        assert_eq!(round.collectibles[0].timer, 3.5);

        // The script has cycled back to its start, so a reset replays the same layout
        round.reset();
        check(&round);
    }

    #[test]
    fn test_avatar_threatened() {
        let mut round = RoundState::new(4);
        for bug in round.obstacles.iter_mut() {
            bug.col = -1.0;
        }
        round.avatar.row = 2;
        round.avatar.col = 1;
        assert!(!round.avatar_threatened());

        round.obstacles[0] = Obstacle {
            id: 0,
            row: 2,
            col: 0.5,
            speed: 2.0,
        };
        // tail in column 0, head in column 1
        assert!(round.avatar_threatened());
        round.avatar.col = 2;
        assert!(!round.avatar_threatened());
    }

    #[test]
    fn test_events_accumulate_until_drained() {
        let mut round = RoundState::new(2);
        round.handle_input(Command::Left);
        tick(&mut round, 0.01);
        round.handle_input(Command::Right);
        tick(&mut round, 0.01);
        assert_eq!(
            round.events(),
            &[
                GameEvent::MoveAccepted { row: 5, col: 1 },
                GameEvent::MoveAccepted { row: 5, col: 2 },
            ]
        );
        assert_eq!(round.drain_events().len(), 2);
        assert!(round.events().is_empty());
    }
}
