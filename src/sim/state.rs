//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the engine owns
//! exactly one of these per session.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::consts::*;
use crate::error::ConfigError;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first tap
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Lives ran out
    GameOver,
}

/// An RGB color, written `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(pub u32);

impl Color {
    pub const MISS: Color = Color(MISS_COLOR);

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or(ConfigError::InvalidColor(s))
    }
}

/// A falling orb the player taps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub radius: f32,
    /// Remaining lifetime (ms)
    pub lifetime: f32,
    pub max_lifetime: f32,
}

/// A stationary spinning wheel split into colored segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorWheel {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Unbounded rotation angle (radians)
    pub rotation: f32,
    /// Signed angular speed (rad/s)
    pub rotation_speed: f32,
    /// Segment colors in angular order
    pub colors: Vec<Color>,
}

impl ColorWheel {
    pub fn segments(&self) -> usize {
        self.colors.len()
    }

    /// Advance rotation by `rotation_speed * dt`
    pub fn rotate(&mut self, dt: f32) {
        self.rotation += self.rotation_speed * dt;
    }

    /// Index of the segment currently at the reference angle
    pub fn active_segment(&self) -> usize {
        let segments = self.segments().max(1);
        let segment_angle = std::f32::consts::TAU / segments as f32;
        let index = (normalize_angle(self.rotation) / segment_angle).floor() as usize;
        index.min(segments - 1)
    }

    pub fn active_color(&self) -> Color {
        self.colors[self.active_segment()]
    }

    /// Whether a point is close enough to count as a tap on this wheel
    pub fn in_reach(&self, point: Vec2) -> bool {
        point.distance(self.pos) <= self.radius + WHEEL_REACH
    }

    /// Scale speed magnitude, keeping the spin direction
    pub fn speed_up(&mut self, factor: f32) {
        self.rotation_speed *= factor;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SlowTime,
    RevealColor,
    ExtraLife,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SlowTime,
        PowerUpKind::RevealColor,
        PowerUpKind::ExtraLife,
        PowerUpKind::ScoreMultiplier,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            PowerUpKind::SlowTime => "⏰",
            PowerUpKind::RevealColor => "👁",
            PowerUpKind::ExtraLife => "❤️",
            PowerUpKind::ScoreMultiplier => "⭐",
        }
    }
}

/// A power-up entity
///
/// Nothing activates power-ups yet: they spawn, fall and leave the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Remaining active duration (ms)
    pub duration: f32,
    pub max_duration: f32,
    pub active: bool,
}

/// What spawned a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Explosion,
    Miss,
    PowerUp,
}

/// A particle for visual effects (no gameplay effect)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    /// Remaining lifetime (ms)
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life as a 0-1 fraction, for fading
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Achievement catalog keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstMatch,
    #[serde(rename = "combo_5")]
    Combo5,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "score_1000")]
    Score1000,
    PerfectGame,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstMatch => "first_match",
            AchievementId::Combo5 => "combo_5",
            AchievementId::Level5 => "level_5",
            AchievementId::Score1000 => "score_1000",
            AchievementId::PerfectGame => "perfect_game",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    pub icon: &'static str,
}

impl Achievement {
    const fn locked(
        id: AchievementId,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            unlocked: false,
            icon,
        }
    }

    /// The fixed catalog, all locked
    pub fn catalog() -> Vec<Achievement> {
        use AchievementId::*;
        vec![
            Self::locked(FirstMatch, "First Match", "Match your first orb", "🎯"),
            Self::locked(Combo5, "Combo Master", "Get a 5x combo", "⚡"),
            Self::locked(Level5, "Speed Demon", "Reach level 5", "🚀"),
            Self::locked(Score1000, "High Scorer", "Score 1000 points", "👑"),
            Self::locked(
                PerfectGame,
                "Perfectionist",
                "Complete a level without missing",
                "💎",
            ),
        ]
    }
}

/// Score, lives and progression for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStats {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Consecutive matches since the last miss
    pub combo: u32,
    pub high_score: u64,
    pub achievements: Vec<Achievement>,
}

impl GameStats {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            combo: 0,
            high_score,
            achievements: Achievement::catalog(),
        }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id && a.unlocked)
    }
}

/// Complete simulation state for one engine
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub stats: GameStats,
    /// Live orbs in spawn order
    pub orbs: Vec<Orb>,
    /// The two wheels, in definition order
    pub wheels: Vec<ColorWheel>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Frame time of the last orb spawn (ms), `None` right after a reset
    pub last_orb_spawn_ms: Option<f64>,
    /// Frame time of the last power-up spawn (ms)
    pub last_power_up_spawn_ms: Option<f64>,
    /// Misses since the last level-up
    pub misses_this_level: u32,
    /// Events raised since the engine last drained them
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state in the menu phase
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        let mut state = Self {
            tuning,
            phase: GamePhase::Menu,
            stats: GameStats::new(high_score),
            orbs: Vec::new(),
            wheels: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            last_orb_spawn_ms: None,
            last_power_up_spawn_ms: None,
            misses_this_level: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.create_wheels();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Two wheels at opposite sides, spinning in opposite directions
    fn create_wheels(&mut self) {
        let width = self.tuning.playfield.width;
        let y = self.tuning.playfield.height * WHEEL_Y_FRACTION;
        let segments = self.tuning.wheel.segments;
        let speed = self.tuning.wheel.base_rotation_speed;
        let radius = self.tuning.wheel.radius;

        for (i, x_frac) in WHEEL_X_FRACTIONS.iter().enumerate() {
            let colors = self.tuning.wheel.colors[i * segments..(i + 1) * segments].to_vec();
            let id = self.next_entity_id();
            self.wheels.push(ColorWheel {
                id,
                pos: Vec2::new(width * x_frac, y),
                radius,
                rotation: 0.0,
                rotation_speed: if i == 0 { speed } else { -speed },
                colors,
            });
        }
    }

    /// Reset the session for a new game (wheels keep their speed)
    pub fn reset_session(&mut self) {
        self.stats.score = 0;
        self.stats.lives = STARTING_LIVES;
        self.stats.level = 1;
        self.stats.combo = 0;
        self.orbs.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.last_orb_spawn_ms = None;
        self.last_power_up_spawn_ms = None;
        self.misses_this_level = 0;
    }

    /// Raise an event for the engine to deliver
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
