//! Particle bursts for matches and misses

use glam::Vec2;
use rand::Rng;

use super::state::{Color, GameState, Particle, ParticleKind};
use crate::consts::*;

/// 8-way radial explosion in the orb's color
pub fn spawn_match_burst(state: &mut GameState, pos: Vec2, color: Color) {
    for i in 0..MATCH_BURST_COUNT {
        let angle = std::f32::consts::TAU * i as f32 / MATCH_BURST_COUNT as f32;
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel: Vec2::from_angle(angle) * MATCH_BURST_SPEED,
            color,
            size: MATCH_BURST_SIZE,
            lifetime: MATCH_BURST_LIFETIME_MS,
            max_lifetime: MATCH_BURST_LIFETIME_MS,
            kind: ParticleKind::Explosion,
        });
    }
}

/// A few slow red particles drifting in random directions
pub fn spawn_miss_burst(state: &mut GameState, pos: Vec2) {
    for _ in 0..MISS_BURST_COUNT {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * MISS_BURST_SPREAD,
            (state.rng.random::<f32>() - 0.5) * MISS_BURST_SPREAD,
        );
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel,
            color: Color::MISS,
            size: MISS_BURST_SIZE,
            lifetime: MISS_BURST_LIFETIME_MS,
            max_lifetime: MISS_BURST_LIFETIME_MS,
            kind: ParticleKind::Miss,
        });
    }
}
