//! Time- and level-gated spawning of orbs and power-ups

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Color, GameState, Orb, PowerUp, PowerUpKind};
use crate::consts::*;

/// Check both spawn gates once for the frame at `now_ms`
pub fn run_spawners(state: &mut GameState, now_ms: f64) {
    if orb_gate_open(state, now_ms) {
        spawn_orb(state);
        state.last_orb_spawn_ms = Some(now_ms);
    }

    if power_up_gate_open(state, now_ms) {
        spawn_power_up(state);
        state.last_power_up_spawn_ms = Some(now_ms);
    }
}

/// Spawn interval shrinks with level; the on-screen cap always applies
fn orb_gate_open(state: &GameState, now_ms: f64) -> bool {
    let interval = state.tuning.orb.spawn_interval_ms / state.stats.level.max(1) as f64;
    let due = state
        .last_orb_spawn_ms
        .is_none_or(|last| now_ms - last > interval);
    due && state.orbs.len() < state.tuning.orb.max_on_screen
}

/// Interval gate first, then a probability roll
fn power_up_gate_open(state: &mut GameState, now_ms: f64) -> bool {
    let interval = state.tuning.power_up.spawn_interval_ms;
    let due = state
        .last_power_up_spawn_ms
        .is_none_or(|last| now_ms - last > interval);
    due && state.rng.random::<f64>() < state.tuning.power_up.spawn_chance
}

/// Spawn an orb just above the top edge, falling faster at higher levels
pub fn spawn_orb(state: &mut GameState) -> u32 {
    let width = state.tuning.playfield.width;
    let x = state.rng.random::<f32>() * (width - 2.0 * ORB_SPAWN_MARGIN) + ORB_SPAWN_MARGIN;
    let color = state
        .tuning
        .orb
        .colors
        .choose(&mut state.rng)
        .copied()
        .unwrap_or(Color(PALETTE[0]));
    let speed = state.tuning.orb.base_speed * state.stats.level as f32;

    let id = state.next_entity_id();
    let lifetime = state.tuning.orb.lifetime_ms;
    state.orbs.push(Orb {
        id,
        pos: Vec2::new(x, SPAWN_Y),
        vel: Vec2::new(0.0, speed),
        color,
        radius: state.tuning.orb.radius,
        lifetime,
        max_lifetime: lifetime,
    });
    log::debug!("Spawned orb {} ({}) at x={:.0}", id, color, x);
    id
}

/// Spawn an inactive power-up of a random kind
pub fn spawn_power_up(state: &mut GameState) -> u32 {
    let width = state.tuning.playfield.width;
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let x = state.rng.random::<f32>() * (width - 2.0 * POWER_UP_SPAWN_MARGIN)
        + POWER_UP_SPAWN_MARGIN;

    let id = state.next_entity_id();
    let duration = state.tuning.power_up.duration_ms;
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(x, SPAWN_Y),
        duration,
        max_duration: duration,
        active: false,
    });
    log::debug!("Spawned power-up {} ({:?})", id, kind);
    id
}
