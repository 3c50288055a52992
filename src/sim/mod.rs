//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the frame timestamps the engine passes in
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod autoplay;
pub mod effects;
pub mod event;
pub mod physics;
pub mod progression;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autoplay::choose_tap;
pub use event::{GameEvent, MissCause};
pub use resolve::{TapOutcome, resolve_tap};
pub use state::{
    Achievement, AchievementId, Color, ColorWheel, GamePhase, GameState, GameStats, Orb,
    Particle, ParticleKind, PowerUp, PowerUpKind,
};
pub use tick::tick;
