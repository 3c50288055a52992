//! Events raised by the simulation
//!
//! The simulation only queues these on [`GameState`](super::GameState);
//! the engine delivers them to listeners in the order they were raised.

use std::fmt;

use serde::Serialize;

use super::state::{Achievement, ColorWheel, Orb, PowerUp};

/// Why an orb was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissCause {
    /// Lifetime ran out
    Expired,
    /// Fell past the bottom of the playfield
    Offscreen,
    /// Tapped, but no wheel in reach showed its color
    NoWheelMatch,
}

impl MissCause {
    /// Expiry and falling off-screen cost a life; a wrong tap does not
    pub fn costs_life(&self) -> bool {
        !matches!(self, MissCause::NoWheelMatch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    OrbMatched {
        orb: Orb,
        wheel: ColorWheel,
        points: u64,
        /// Combo after this match
        combo: u32,
    },
    OrbMissed {
        orb: Orb,
        cause: MissCause,
    },
    /// Reserved for power-up pickup, which nothing raises yet
    PowerUpCollected {
        power_up: PowerUp,
    },
    LevelUp {
        new_level: u32,
    },
    GameOver {
        final_score: u64,
        new_high_score: bool,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
}

/// HUD notification text
impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::OrbMatched { points, .. } => write!(f, "+{} points!", points),
            GameEvent::OrbMissed { .. } => write!(f, "Missed!"),
            GameEvent::PowerUpCollected { power_up } => {
                write!(f, "Power-up {}", power_up.kind.icon())
            }
            GameEvent::LevelUp { new_level } => write!(f, "Level {}!", new_level),
            GameEvent::GameOver { final_score, .. } => {
                write!(f, "Game Over! Final Score: {}", final_score)
            }
            GameEvent::AchievementUnlocked { achievement } => {
                write!(f, "Achievement: {}", achievement.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{AchievementId, Color};
    use glam::Vec2;

    fn orb() -> Orb {
        Orb {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Color(0xFF6B6B),
            radius: 20.0,
            lifetime: 5000.0,
            max_lifetime: 5000.0,
        }
    }

    #[test]
    fn test_notification_text() {
        let missed = GameEvent::OrbMissed {
            orb: orb(),
            cause: MissCause::Expired,
        };
        assert_eq!(missed.to_string(), "Missed!");
        assert_eq!(GameEvent::LevelUp { new_level: 3 }.to_string(), "Level 3!");
        let over = GameEvent::GameOver {
            final_score: 120,
            new_high_score: false,
        };
        assert_eq!(over.to_string(), "Game Over! Final Score: 120");

        let first = crate::sim::state::Achievement::catalog()
            .into_iter()
            .find(|a| a.id == AchievementId::FirstMatch)
            .unwrap();
        let unlocked = GameEvent::AchievementUnlocked { achievement: first };
        assert_eq!(unlocked.to_string(), "Achievement: First Match");
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(GameEvent::LevelUp { new_level: 2 }).unwrap();
        assert_eq!(json["type"], "LEVEL_UP");
        assert_eq!(json["new_level"], 2);
    }

    #[test]
    fn test_only_passive_misses_cost_lives() {
        assert!(MissCause::Expired.costs_life());
        assert!(MissCause::Offscreen.costs_life());
        assert!(!MissCause::NoWheelMatch.costs_life());
    }
}
