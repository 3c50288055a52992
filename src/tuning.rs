//! Data-driven game balance
//!
//! Every section defaults to the shipped values, so a JSON override only needs
//! the keys it changes:
//!
//! ```
//! use color_match_rush::Tuning;
//!
//! let tuning = Tuning::from_json(r#"{ "playfield": { "width": 400, "height": 600 },
//!                                   "orb": { "max_on_screen": 4 } }"#).unwrap();
//! assert_eq!(tuning.orb.max_on_screen, 4);
//! assert_eq!(tuning.orb.spawn_interval_ms, 1000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::PALETTE;
use crate::error::ConfigError;
use crate::sim::state::Color;

/// Playfield size in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldTuning {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
        }
    }
}

/// Orb spawning and lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    /// Initial fall speed at level 1 (px/s), multiplied by the level
    pub base_speed: f32,
    /// Spawn interval at level 1 (ms), divided by the level
    pub spawn_interval_ms: f64,
    pub max_on_screen: usize,
    pub radius: f32,
    pub lifetime_ms: f32,
    pub colors: Vec<Color>,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            base_speed: 200.0,
            spawn_interval_ms: 1000.0,
            max_on_screen: 8,
            radius: 20.0,
            lifetime_ms: 5000.0,
            colors: PALETTE.iter().copied().map(Color).collect(),
        }
    }
}

/// Color wheels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelTuning {
    /// Rotation speed magnitude (rad/s); the second wheel spins the other way
    pub base_rotation_speed: f32,
    pub radius: f32,
    pub segments: usize,
    /// First `segments` colors go to the left wheel, the next `segments` to the right
    pub colors: Vec<Color>,
}

impl Default for WheelTuning {
    fn default() -> Self {
        Self {
            base_rotation_speed: 1.5,
            radius: 60.0,
            segments: 4,
            colors: PALETTE.iter().copied().map(Color).collect(),
        }
    }
}

/// Power-up spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    /// Chance per eligible tick that a power-up spawns
    pub spawn_chance: f64,
    /// Minimum time between power-up spawns (ms)
    pub spawn_interval_ms: f64,
    pub duration_ms: f32,
    /// Fall speed while inactive (px/s)
    pub fall_speed: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            spawn_chance: 0.15,
            spawn_interval_ms: 10_000.0,
            duration_ms: 5000.0,
            fall_speed: 100.0,
        }
    }
}

/// Orb falling physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Terminal fall speed (px/s)
    pub max_velocity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            max_velocity: 500.0,
        }
    }
}

/// Points, combo and level curve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub base_points: f64,
    /// Each consecutive match multiplies points by this
    pub combo_multiplier: f64,
    /// Level N ends at `N * level_score_step` points
    pub level_score_step: u64,
    /// Wheel speed multiplier per level-up
    pub level_speedup: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_points: 10.0,
            combo_multiplier: 1.2,
            level_score_step: 200,
            level_speedup: 1.1,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: PlayfieldTuning,
    pub orb: OrbTuning,
    pub wheel: WheelTuning,
    pub power_up: PowerUpTuning,
    pub physics: PhysicsTuning,
    pub scoring: ScoringTuning,
}

impl Tuning {
    /// Default balance for the given playfield
    pub fn for_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield: PlayfieldTuning { width, height },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would produce NaN geometry or empty draws
    pub fn validate(&self) -> Result<(), ConfigError> {
        let PlayfieldTuning { width, height } = self.playfield;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidPlayfield { width, height });
        }

        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::InvalidTuning { field, reason })
            }
        }

        check(!self.orb.colors.is_empty(), "orb.colors", "palette is empty")?;
        check(
            self.orb.spawn_interval_ms > 0.0,
            "orb.spawn_interval_ms",
            "must be positive",
        )?;
        check(self.orb.base_speed.is_finite(), "orb.base_speed", "must be finite")?;
        check(self.orb.radius > 0.0, "orb.radius", "must be positive")?;
        check(self.orb.lifetime_ms > 0.0, "orb.lifetime_ms", "must be positive")?;
        check(self.wheel.segments > 0, "wheel.segments", "must be at least 1")?;
        check(
            self.wheel.colors.len() >= 2 * self.wheel.segments,
            "wheel.colors",
            "needs one color per segment for both wheels",
        )?;
        check(self.wheel.radius > 0.0, "wheel.radius", "must be positive")?;
        check(
            self.wheel.base_rotation_speed.is_finite(),
            "wheel.base_rotation_speed",
            "must be finite",
        )?;
        check(
            (0.0..=1.0).contains(&self.power_up.spawn_chance),
            "power_up.spawn_chance",
            "must be within [0, 1]",
        )?;
        check(self.physics.gravity.is_finite(), "physics.gravity", "must be finite")?;
        check(
            self.physics.max_velocity >= 0.0,
            "physics.max_velocity",
            "must not be negative",
        )?;
        check(
            self.scoring.level_score_step > 0,
            "scoring.level_score_step",
            "must be positive",
        )?;
        check(
            self.scoring.combo_multiplier > 0.0 && self.scoring.combo_multiplier.is_finite(),
            "scoring.combo_multiplier",
            "must be positive",
        )?;
        check(
            self.scoring.level_speedup > 0.0 && self.scoring.level_speedup.is_finite(),
            "scoring.level_speedup",
            "must be positive",
        )?;
        Ok(())
    }
}
