//! Combo, scoring, level-ups and achievements

use super::event::GameEvent;
use super::state::{AchievementId, GameState};

/// Points for the `combo`-th consecutive match: `floor(base * mult^(combo-1))`
///
/// Saturates at `u64::MAX` once the curve outgrows the score type.
pub fn points_for_combo(combo: u32, base_points: f64, multiplier: f64) -> u64 {
    let exponent = combo.saturating_sub(1).min(i32::MAX as u32) as i32;
    let points = (base_points * multiplier.powi(exponent)).floor();
    if points.is_nan() || points <= 0.0 {
        0
    } else if points >= u64::MAX as f64 {
        u64::MAX
    } else {
        points as u64
    }
}

/// Count a successful match: bump combo and award points
pub fn register_match(state: &mut GameState) -> u64 {
    state.stats.combo = state.stats.combo.saturating_add(1);
    let scoring = &state.tuning.scoring;
    let points = points_for_combo(
        state.stats.combo,
        scoring.base_points,
        scoring.combo_multiplier,
    );
    state.stats.score = state.stats.score.saturating_add(points);
    points
}

/// Count any miss: the combo is broken
pub fn register_miss(state: &mut GameState) {
    state.stats.combo = 0;
    state.misses_this_level += 1;
}

/// Advance at most one level when the score reaches `level * step`
///
/// Every level-up makes both wheels spin faster, compounding.
pub fn check_level_up(state: &mut GameState) -> bool {
    let step = state.tuning.scoring.level_score_step;
    let target = (state.stats.level as u64).saturating_mul(step);
    if state.stats.score < target {
        return false;
    }

    state.stats.level += 1;
    let new_level = state.stats.level;
    log::info!("Level {} reached (score {})", new_level, state.stats.score);
    state.emit(GameEvent::LevelUp { new_level });

    let speedup = state.tuning.scoring.level_speedup;
    for wheel in &mut state.wheels {
        wheel.speed_up(speedup);
    }

    if state.misses_this_level == 0 {
        unlock(state, AchievementId::PerfectGame);
    }
    state.misses_this_level = 0;
    true
}

/// Unlock whatever the current stats qualify for (run after each match)
pub fn check_achievements(state: &mut GameState) {
    let stats = &state.stats;
    let earned = [
        (AchievementId::FirstMatch, stats.combo >= 1),
        (AchievementId::Combo5, stats.combo >= 5),
        (AchievementId::Level5, stats.level >= 5),
        (AchievementId::Score1000, stats.score >= 1000),
    ];
    for (id, ok) in earned {
        if ok {
            unlock(state, id);
        }
    }
}

/// Flip an achievement to unlocked; raises the event only on the first unlock
pub fn unlock(state: &mut GameState, id: AchievementId) -> bool {
    let Some(achievement) = state
        .stats
        .achievements
        .iter_mut()
        .find(|a| a.id == id && !a.unlocked)
    else {
        return false;
    };
    achievement.unlocked = true;
    let achievement = achievement.clone();
    log::info!("Achievement unlocked: {}", achievement.id.as_str());
    state.emit(GameEvent::AchievementUnlocked { achievement });
    true
}
