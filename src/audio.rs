//! Sound cue mapping
//!
//! The core only emits [`GameEvent`]s. This module turns them into named sound effects and
//! applies volume and mute, leaving actual playback to whatever audio backend the host has.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Avatar hopped a cell
    Hop,
    /// Character changed
    Swap,
    /// Gem picked up
    GemCollect,
    /// Reached the water
    Splash,
    /// Caught by a bug
    Squish,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// Sound for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MoveAccepted { .. } => Some(SoundEffect::Hop),
            GameEvent::CosmeticToggled { .. } => Some(SoundEffect::Swap),
            GameEvent::BonusCollected { .. } => Some(SoundEffect::GemCollect),
            GameEvent::DestinationReached { .. } => Some(SoundEffect::Splash),
            GameEvent::LifeLost { .. } => Some(SoundEffect::Squish),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::RoundReset => None,
        }
    }

    /// Asset key the audio backend loads
    pub fn sound_key(&self) -> &'static str {
        match self {
            SoundEffect::Hop => "sounds/hop.wav",
            SoundEffect::Swap => "sounds/swap.wav",
            SoundEffect::GemCollect => "sounds/gem.wav",
            SoundEffect::Splash => "sounds/splash.wav",
            SoundEffect::Squish => "sounds/squish.wav",
            SoundEffect::GameOver => "sounds/game-over.wav",
        }
    }

    /// Relative loudness so frequent hops sit under the rarer cues
    fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Hop => 0.4,
            SoundEffect::Swap => 0.5,
            SoundEffect::GemCollect => 0.8,
            SoundEffect::Splash => 0.9,
            SoundEffect::Squish => 1.0,
            SoundEffect::GameOver => 1.0,
        }
    }
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub key: &'static str,
    pub gain: f32,
}

/// Volume and mute state for the host's audio backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cue for an event, or `None` if it is silent or muted
    pub fn cue(&self, event: &GameEvent) -> Option<SoundCue> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        let effect = SoundEffect::for_event(event)?;
        Some(SoundCue {
            effect,
            key: effect.sound_key(),
            gain: vol * effect.base_gain(),
        })
    }

    /// Cues for a batch of events, in order
    pub fn cues<'a>(&'a self, events: &'a [GameEvent]) -> impl Iterator<Item = SoundCue> + 'a {
        events.iter().filter_map(|event| self.cue(event))
    }
}
