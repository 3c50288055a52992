//! Geometry and integration primitives
//!
//! Vector math comes from glam; this module adds the few game-specific rules
//! on top (terminal velocity, frame delta clamp, tap distance tests).

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;

/// Apply downward gravity for `dt` seconds, capping fall speed at `max_velocity`
#[inline]
pub fn integrate_gravity(vel: &mut Vec2, gravity: f32, max_velocity: f32, dt: f32) {
    vel.y = (vel.y + gravity * dt).min(max_velocity);
}

/// Explicit Euler position step
#[inline]
pub fn integrate_position(pos: &mut Vec2, vel: Vec2, dt: f32) {
    *pos += vel * dt;
}

/// Whether `a` and `b` are within `radius` of each other (inclusive)
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) <= radius
}

/// Seconds to integrate for a frame, given the wall-clock gap in milliseconds
///
/// Never exceeds [`MAX_FRAME_DT`]; clocks running backwards give zero.
#[inline]
pub fn frame_dt(elapsed_ms: f64) -> f32 {
    let dt = (elapsed_ms / 1000.0) as f32;
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_capped() {
        let mut vel = Vec2::new(0.0, 490.0);
        integrate_gravity(&mut vel, 300.0, 500.0, 1.0 / 30.0);
        assert_eq!(vel.y, 500.0);

        let mut vel = Vec2::new(3.0, 200.0);
        integrate_gravity(&mut vel, 300.0, 500.0, 0.1);
        assert!((vel.y - 230.0).abs() < 1e-4);
        assert_eq!(vel.x, 3.0);
    }

    #[test]
    fn test_within_inclusive() {
        assert!(within(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
        assert!(!within(Vec2::ZERO, Vec2::new(3.0, 4.0), 4.99));
    }

    #[test]
    fn test_frame_dt_examples() {
        assert_eq!(frame_dt(0.0), 0.0);
        assert!((frame_dt(16.0) - 0.016).abs() < 1e-6);
        assert_eq!(frame_dt(5000.0), MAX_FRAME_DT);
        assert_eq!(frame_dt(-20.0), 0.0);
        assert_eq!(frame_dt(f64::NAN), 0.0);
    }

    proptest! {
        #[test]
        fn prop_frame_dt_bounded(elapsed in -1.0e9f64..1.0e9f64) {
            let dt = frame_dt(elapsed);
            prop_assert!(dt >= 0.0);
            prop_assert!(dt <= 1.0 / 30.0);
        }
    }
}
