//! Per-frame simulation tick
//!
//! Order within a tick: spawners, orbs, wheels, power-ups, particles, then
//! level progression. Nothing moves unless the phase is `Playing`.

use super::effects::spawn_miss_burst;
use super::event::{GameEvent, MissCause};
use super::physics::{integrate_gravity, integrate_position};
use super::progression::{check_level_up, register_miss};
use super::spawn::run_spawners;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame of `dt` seconds at frame time `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    run_spawners(state, now_ms);
    update_orbs(state, dt);
    update_wheels(state, dt);
    update_power_ups(state, dt);
    update_particles(state, dt);

    // Losing the last life this tick ends progression too
    if state.phase == GamePhase::Playing {
        check_level_up(state);
    }
}

/// Fall, age, and turn expired or fallen orbs into misses
pub fn update_orbs(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.physics.gravity;
    let max_velocity = state.tuning.physics.max_velocity;
    for orb in &mut state.orbs {
        integrate_gravity(&mut orb.vel, gravity, max_velocity, dt);
        integrate_position(&mut orb.pos, orb.vel, dt);
        orb.lifetime -= dt * 1000.0;
    }

    let floor = state.tuning.playfield.height + OFFSCREEN_MARGIN;
    let (lost, live): (Vec<_>, Vec<_>) = std::mem::take(&mut state.orbs)
        .into_iter()
        .partition(|orb| orb.pos.y > floor || orb.lifetime <= 0.0);
    state.orbs = live;

    for orb in lost {
        let cause = if orb.pos.y > floor {
            MissCause::Offscreen
        } else {
            MissCause::Expired
        };
        if cause.costs_life() {
            lose_life(state);
        }
        register_miss(state);
        spawn_miss_burst(state, orb.pos);
        log::debug!("Orb {} lost ({:?}), {} lives left", orb.id, cause, state.stats.lives);
        state.emit(GameEvent::OrbMissed { orb, cause });

        if state.stats.lives == 0 && state.phase == GamePhase::Playing {
            game_over(state);
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.stats.lives = state.stats.lives.saturating_sub(1);
}

pub fn update_wheels(state: &mut GameState, dt: f32) {
    for wheel in &mut state.wheels {
        wheel.rotate(dt);
    }
}

/// Inactive power-ups fall; active ones count down
pub fn update_power_ups(state: &mut GameState, dt: f32) {
    let fall_speed = state.tuning.power_up.fall_speed;
    for power_up in &mut state.power_ups {
        if power_up.active {
            power_up.duration -= dt * 1000.0;
        } else {
            power_up.pos.y += fall_speed * dt;
        }
    }

    let floor = state.tuning.playfield.height + OFFSCREEN_MARGIN;
    state.power_ups.retain(|p| {
        if p.active {
            p.duration > 0.0
        } else {
            p.pos.y <= floor
        }
    });
}

pub fn update_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        integrate_position(&mut particle.pos, particle.vel, dt);
        particle.lifetime -= dt * 1000.0;
        particle.size *= PARTICLE_SHRINK;
    }
    state.particles.retain(|p| p.lifetime > 0.0);
}

/// End the session, recording a beaten high score
pub fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let final_score = state.stats.score;
    let new_high_score = final_score > state.stats.high_score;
    if new_high_score {
        state.stats.high_score = final_score;
    }
    log::info!(
        "Game over: score {} level {}{}",
        final_score,
        state.stats.level,
        if new_high_score { " (new high score)" } else { "" }
    );
    state.emit(GameEvent::GameOver {
        final_score,
        new_high_score,
    });
}
