//! Host-facing session driver
//!
//! Wraps a [`RoundState`] with the bits every host needs: clamping frame deltas, routing
//! commands, handing out the frame's events, and recording finished rounds.

use rand_pcg::Pcg32;

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScores;
use crate::sim::{Command, GameEvent, RandomSource, RoundState, tick};
use crate::tuning::{Tuning, TuningError};

pub struct Session<R: RandomSource = Pcg32> {
    pub round: RoundState<R>,
    pub high_scores: HighScores,
    /// 1-based count of rounds started this session
    round_number: u32,
    /// Rank of the last finished round on the leaderboard, if it placed
    pub last_rank: Option<usize>,
}

impl Session<Pcg32> {
    pub fn new(seed: u64) -> Self {
        Self::from_round(RoundState::new(seed))
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        RoundState::with_tuning(tuning, seed).map(Self::from_round)
    }
}

impl<R: RandomSource> Session<R> {
    pub fn from_round(round: RoundState<R>) -> Self {
        Self {
            round,
            high_scores: HighScores::new(),
            round_number: 1,
            last_rank: None,
        }
    }

    /// Run one frame with `elapsed` seconds since the last one and return its events.
    ///
    /// Long stalls (tab switches, debugger pauses) are clamped so bugs don't jump lanes.
    /// A non-finite `elapsed` counts as no time at all.
    pub fn frame(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        tick(&mut self.round, dt);
        let events = self.round.drain_events();

        for event in &events {
            if let GameEvent::GameOver { final_score } = *event {
                let sprite = self.round.avatar.sprite;
                self.last_rank = self
                    .high_scores
                    .add_score(final_score, sprite, self.round_number);
            }
        }
        events
    }

    /// Deliver a command immediately
    pub fn press(&mut self, command: Command) {
        self.round.handle_input(command);
    }

    /// Deliver a raw host key; unknown keys are ignored
    pub fn press_key(&mut self, key: &str) {
        match Command::from_key(key) {
            Some(command) => self.press(command),
            None => log::trace!("Ignoring key {:?}", key),
        }
    }

    /// Overlay asked for a new round
    pub fn restart(&mut self) {
        self.round.reset();
        self.round_number += 1;
        self.last_rank = None;
    }

    pub fn is_over(&self) -> bool {
        self.round.paused
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::{Cell, Obstacle};

    fn doomed(session: &mut Session) {
        let round = &mut session.round;
        round.avatar.lives = 1;
        round.avatar.row = 1;
        round.avatar.col = 2;
        round.obstacles[0] = Obstacle {
            id: 0,
            row: 1,
            col: 1.7,
            speed: 1.5,
        };
        for bug in round.obstacles.iter_mut().skip(1) {
            bug.col = -1.0;
        }
    }

    #[test]
    fn test_frame_clamps_long_stalls() {
        let mut session = Session::new(5);
        session.round.obstacles[0] = Obstacle {
            id: 0,
            row: 2,
            col: 0.0,
            speed: 2.0,
        };
        session.frame(10.0);
        assert!((session.round.obstacles[0].col - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_negative_elapsed_is_zero() {
        let mut session = Session::new(5);
        session.round.obstacles[0].col = 1.0;
        session.frame(-1.0);
        assert_eq!(session.round.obstacles[0].col, 1.0);
    }

    #[test]
    fn test_non_finite_elapsed_is_zero() {
        let mut session = Session::new(5);
        session.round.obstacles[0] = Obstacle {
            id: 0,
            row: 2,
            col: 3.0,
            speed: 2.0,
        };
        let timers: Vec<f32> = session.round.collectibles.iter().map(|g| g.timer).collect();

        for elapsed in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            session.frame(elapsed);
        }
        let bug = &session.round.obstacles[0];
        assert_eq!((bug.row, bug.col), (2, 3.0));
        assert_eq!((bug.tail_col(), bug.head_col()), (3, 3));
        let after: Vec<f32> = session.round.collectibles.iter().map(|g| g.timer).collect();
        assert_eq!(after, timers);

        // Still crawls and wraps afterwards: past the edge after 61 frames, then back at -1
        for _ in 0..90 {
            session.frame(FRAME_DT);
        }
        assert!(session.round.obstacles.iter().all(|o| o.col.is_finite()));
        assert!(session.round.obstacles[0].col < 3.0);
    }

    #[test]
    fn test_invalid_tuning_is_an_error() {
        let tuning = Tuning {
            cols: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::with_tuning(tuning, 1),
            Err(TuningError::InvalidGrid { rows: 6, cols: 0 })
        ));
        assert!(Session::with_tuning(Tuning::default(), 1).is_ok());
    }

    #[test]
    fn test_press_key_routes_and_ignores_unknown() {
        let mut session = Session::new(6);
        session.press_key("escape");
        session.press_key("up");
        assert_eq!(session.round.avatar.position(), Cell::new(4, 2));
    }

    #[test]
    fn test_game_over_records_score_and_restart() {
        let mut session = Session::new(7);
        session.round.avatar.score = 900;
        doomed(&mut session);

        let events = session.frame(FRAME_DT);
        assert!(events.contains(&GameEvent::GameOver { final_score: 900 }));
        assert!(session.is_over());
        assert_eq!(session.last_rank, Some(1));
        assert_eq!(session.high_scores.top_score(), Some(900));

        // Frozen until restart
        assert!(session.frame(FRAME_DT).is_empty());

        session.restart();
        assert!(!session.is_over());
        assert_eq!(session.round_number(), 2);
        assert_eq!(session.round.avatar.score, 0);
        assert_eq!(session.round.avatar.lives, 3);
        assert_eq!(session.high_scores.entries.len(), 1);
    }
}
