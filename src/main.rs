//! Lane Dash headless runner
//!
//! Plays a seeded round with a simple autopilot and prints the result. Useful for soak
//! testing tuning files without a renderer.
//!
//! Usage: `lane-dash [seed] [tuning.json]`

#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use lane_dash::audio::AudioMixer;
use lane_dash::consts::FRAME_DT;
use lane_dash::render::{hud, text_frame};
use lane_dash::sim::{Command, GameEvent, RandomSource, RoundState};
use lane_dash::{Session, Tuning};

const DEFAULT_SEED: u64 = 0x1a_e0da_5400;
/// Five minutes at 60 Hz
const MAX_FRAMES: u32 = 60 * 60 * 5;
/// Frames between autopilot decisions
const DECISION_FRAMES: u32 = 12;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED);
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Lane Dash (headless) starting with seed {}", seed);
    let mut session = match Session::with_tuning(tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mixer = AudioMixer::new();

    let mut frames = 0;
    while frames < MAX_FRAMES && !session.is_over() {
        if frames % DECISION_FRAMES == 0 {
            if let Some(command) = autopilot(&session.round) {
                session.press(command);
            }
        }
        let events = session.frame(FRAME_DT);
        for cue in mixer.cues(&events) {
            log::trace!("play {} at {:.2}", cue.key, cue.gain);
        }
        for event in &events {
            match event {
                GameEvent::MoveAccepted { .. } | GameEvent::CosmeticToggled { .. } => {}
                other => log::debug!("frame {}: {:?}", frames, other),
            }
        }
        frames += 1;
    }

    print!("{}", text_frame(&session.round));
    match serde_json::to_string_pretty(&hud(&session.round)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode HUD: {}", e),
    }
    log::info!(
        "Finished after {} frames ({:.1}s simulated)",
        frames,
        frames as f32 * FRAME_DT
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Session` directly; there is no headless run in the browser
}

fn load_tuning(path: &str) -> Result<Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e))?;
    Tuning::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

/// Hop forward when the next lane is clear near our column, back off when threatened
fn autopilot<R: RandomSource>(round: &RoundState<R>) -> Option<Command> {
    let avatar = &round.avatar;
    let col = avatar.col as f32;
    let danger = |row: i32| {
        round
            .obstacles
            .iter()
            .any(|bug| bug.row == row && bug.col > col - 2.0 && bug.col < col + 0.7)
    };

    if !danger(avatar.row - 1) {
        Some(Command::Up)
    } else if (round.avatar_threatened() || danger(avatar.row))
        && avatar.row < round.tuning.rows - 1
    {
        Some(Command::Down)
    } else {
        None
    }
}
