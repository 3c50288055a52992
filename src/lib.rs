//! Color Match Rush - tap falling orbs while a spinning wheel shows their color
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, matching, progression)
//! - `engine`: Session state machine, frame clock and event bus
//! - `audio`: Sound cue routing for an injected audio sink
//! - `persistence`: High score storage
//! - `platform`: Browser start-up hook and JS bindings
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, Key, ListenerId, Snapshot};
pub use error::{ConfigError, PersistError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest delta time a single frame may integrate (spiral of death guard)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u32 = 3;

    /// Spawned entities appear just above the top edge
    pub const SPAWN_Y: f32 = -30.0;
    /// Horizontal margin for orb spawns
    pub const ORB_SPAWN_MARGIN: f32 = 30.0;
    /// Horizontal margin for power-up spawns
    pub const POWER_UP_SPAWN_MARGIN: f32 = 20.0;
    /// Entities below `height + OFFSCREEN_MARGIN` are gone
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Extra pick radius around an orb for taps
    pub const TAP_TOLERANCE: f32 = 10.0;
    /// Extra radius around a wheel in which a tap counts as "on" the wheel
    pub const WHEEL_REACH: f32 = 50.0;

    /// Wheels sit at this fraction of the playfield height
    pub const WHEEL_Y_FRACTION: f32 = 0.8;
    /// Horizontal placement of the two wheels (fractions of width)
    pub const WHEEL_X_FRACTIONS: [f32; 2] = [0.25, 0.75];

    /// Particle size multiplier applied every tick
    pub const PARTICLE_SHRINK: f32 = 0.98;
    /// Match explosion: particle count, speed, size, lifetime (ms)
    pub const MATCH_BURST_COUNT: u32 = 8;
    pub const MATCH_BURST_SPEED: f32 = 100.0;
    pub const MATCH_BURST_SIZE: f32 = 8.0;
    pub const MATCH_BURST_LIFETIME_MS: f32 = 500.0;
    /// Miss burst: particle count, max speed spread, size, lifetime (ms)
    pub const MISS_BURST_COUNT: u32 = 4;
    pub const MISS_BURST_SPREAD: f32 = 50.0;
    pub const MISS_BURST_SIZE: f32 = 6.0;
    pub const MISS_BURST_LIFETIME_MS: f32 = 300.0;
    /// Miss particles are always red
    pub const MISS_COLOR: u32 = 0xFF4444;

    /// Default orb and wheel palette
    pub const PALETTE: [u32; 8] = [
        0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0x98D8C8, 0xF7DC6F,
    ];
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}
