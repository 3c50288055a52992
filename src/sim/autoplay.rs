//! Demo-mode player
//!
//! Picks a tap that the resolver would score, if one exists this frame.
//! Only the headless runner uses it; the engine never plays by itself.

use glam::Vec2;

use super::resolve::{matching_wheel, pick_orb};
use super::state::GameState;

/// Position to tap for a guaranteed match, newest orb first
pub fn choose_tap(state: &GameState) -> Option<Vec2> {
    (0..state.orbs.len()).rev().find_map(|idx| {
        let orb = &state.orbs[idx];
        // A newer orb overlapping this one would steal the tap
        let picked = pick_orb(state, orb.pos) == Some(idx);
        let scores = matching_wheel(state, orb.pos, orb.color).is_some();
        (picked && scores).then_some(orb.pos)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::resolve::{TapOutcome, resolve_tap};
    use crate::sim::state::{Color, Orb};
    use crate::tuning::Tuning;

    fn state_with_orb(pos: Vec2, color: Color) -> GameState {
        let mut state = GameState::new(Tuning::for_playfield(400.0, 600.0), 5, 0);
        let id = state.next_entity_id();
        state.orbs.push(Orb {
            id,
            pos,
            vel: Vec2::ZERO,
            color,
            radius: 20.0,
            lifetime: 5000.0,
            max_lifetime: 5000.0,
        });
        state
    }

    #[test]
    fn test_no_tap_without_match() {
        let state = state_with_orb(Vec2::new(200.0, 50.0), Color(0xFF6B6B));
        assert_eq!(choose_tap(&state), None);

        let state = state_with_orb(Vec2::new(100.0, 480.0), Color(0x4ECDC4));
        assert_eq!(choose_tap(&state), None);
    }

    #[test]
    fn test_chosen_tap_scores() {
        let mut state = state_with_orb(Vec2::new(110.0, 450.0), Color(0xFF6B6B));
        let tap = choose_tap(&state).expect("orb over matching wheel");
        assert!(matches!(resolve_tap(&mut state, tap), TapOutcome::Matched { .. }));
    }
}
