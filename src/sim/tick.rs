//! Per-frame simulation tick
//!
//! Order within a tick is fixed: every entity moves first, then obstacles are checked
//! against the avatar, then gem pickups, then the destination row. Collisions always see
//! post-motion positions.

use super::entity::{Entity, OccupancyView, TickContext};
use super::rng::RandomSource;
use super::state::RoundState;

/// Advance the round by `dt` seconds. Does nothing once the round is over.
///
/// Signals land in the round's event buffer and stay there until
/// [`RoundState::drain_events`] takes them. `dt` is used as given; [`crate::Session`]
/// is the layer that sanitizes host frame times.
pub fn tick<R: RandomSource>(round: &mut RoundState<R>, dt: f32) {
    if round.paused {
        return;
    }
    round.time_ticks += 1;

    advance_entities(round, dt);

    if resolve_obstacle_hits(round) {
        round.end_round();
        return;
    }
    resolve_pickups(round);
    resolve_destination(round);
}

fn advance_entities<R: RandomSource>(round: &mut RoundState<R>, dt: f32) {
    let nobody = OccupancyView::new();
    let mut ctx = TickContext {
        rng: &mut round.rng,
        tuning: &round.tuning,
        view: &nobody,
    };
    round.avatar.update(dt, &mut ctx);
    for obstacle in &mut round.obstacles {
        obstacle.update(dt, &mut ctx);
    }

    for idx in 0..round.collectibles.len() {
        let view = round.placement_view(idx);
        let mut ctx = TickContext {
            rng: &mut round.rng,
            tuning: &round.tuning,
            view: &view,
        };
        round.collectibles[idx].update(dt, &mut ctx);
    }
}

/// Returns `true` when a hit took the avatar's last life
fn resolve_obstacle_hits<R: RandomSource>(round: &mut RoundState<R>) -> bool {
    for obstacle in &round.obstacles {
        if !obstacle.covers(round.avatar.position()) {
            continue;
        }
        let event = round.avatar.lose_life();
        round.events.push(event);
        log::debug!(
            "Obstacle {} caught the avatar, {} lives left",
            obstacle.id,
            round.avatar.lives
        );
        if round.avatar.is_out_of_lives() {
            return true;
        }
    }
    false
}

fn resolve_pickups<R: RandomSource>(round: &mut RoundState<R>) {
    let here = round.avatar.position();
    for idx in 0..round.collectibles.len() {
        if !round.collectibles[idx].covers(here) {
            continue;
        }
        let view = round.placement_view(idx);
        let mut ctx = TickContext {
            rng: &mut round.rng,
            tuning: &round.tuning,
            view: &view,
        };
        let points = round.collectibles[idx].collect(&mut ctx);
        let event = round.avatar.collect_points(points, true);
        round.events.push(event);
        log::debug!("Gem {} collected for {} points", round.collectibles[idx].id, points);
    }
}

fn resolve_destination<R: RandomSource>(round: &mut RoundState<R>) {
    if !round.avatar.at_destination() {
        return;
    }
    let event = round.avatar.collect_points(round.tuning.water_bonus, false);
    round.avatar.reset_position();
    round.events.push(event);
    log::debug!("Reached the water, score {}", round.avatar.score);
}
