//! Tap resolution: which orb was tapped, and did a wheel show its color

use glam::Vec2;

use super::effects::{spawn_match_burst, spawn_miss_burst};
use super::event::{GameEvent, MissCause};
use super::physics::within;
use super::progression::{check_achievements, register_match, register_miss};
use super::state::{Color, GameState};
use crate::consts::TAP_TOLERANCE;

/// What a single tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// No orb under the tap
    Ignored,
    /// Orb matched against the wheel with this id
    Matched { orb_id: u32, wheel_id: u32, points: u64 },
    /// Orb tapped but no wheel in reach showed its color
    Missed { orb_id: u32 },
}

/// Index of the orb under `point`, preferring the most recently spawned
pub fn pick_orb(state: &GameState, point: Vec2) -> Option<usize> {
    state
        .orbs
        .iter()
        .rposition(|orb| within(orb.pos, point, orb.radius + TAP_TOLERANCE))
}

/// Index of the first wheel in reach of `point` whose active color is `color`
///
/// A wheel in reach that shows the wrong color does not stop the scan.
pub fn matching_wheel(state: &GameState, point: Vec2, color: Color) -> Option<usize> {
    state
        .wheels
        .iter()
        .position(|wheel| wheel.in_reach(point) && wheel.active_color() == color)
}

/// Resolve a tap at `point` against live orbs and wheels
///
/// A wrong tap breaks the combo and discards the orb, but costs no life.
pub fn resolve_tap(state: &mut GameState, point: Vec2) -> TapOutcome {
    let Some(orb_idx) = pick_orb(state, point) else {
        return TapOutcome::Ignored;
    };
    let orb = state.orbs.remove(orb_idx);

    match matching_wheel(state, point, orb.color) {
        Some(wheel_idx) => {
            let points = register_match(state);
            spawn_match_burst(state, orb.pos, orb.color);
            let wheel = state.wheels[wheel_idx].clone();
            let outcome = TapOutcome::Matched {
                orb_id: orb.id,
                wheel_id: wheel.id,
                points,
            };
            log::debug!("Orb {} matched on wheel {} for {} points", orb.id, wheel.id, points);
            let combo = state.stats.combo;
            state.emit(GameEvent::OrbMatched {
                orb,
                wheel,
                points,
                combo,
            });
            check_achievements(state);
            outcome
        }
        None => {
            register_miss(state);
            spawn_miss_burst(state, orb.pos);
            log::debug!("Orb {} tapped without a matching wheel", orb.id);
            let orb_id = orb.id;
            state.emit(GameEvent::OrbMissed {
                orb,
                cause: MissCause::NoWheelMatch,
            });
            TapOutcome::Missed { orb_id }
        }
    }
}
