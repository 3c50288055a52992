//! Game engine: the surface a presentation layer talks to
//!
//! The host calls [`Engine::frame`] once per display refresh and forwards
//! pointer and key input. Events raised by the simulation are delivered to
//! registered listeners synchronously, in registration order, before the
//! call that raised them returns.

use glam::Vec2;
use serde::Serialize;

use crate::error::ConfigError;
use crate::persistence::{HighScoreStore, MemoryStore};
use crate::sim::physics::frame_dt;
use crate::sim::{
    ColorWheel, GameEvent, GamePhase, GameState, GameStats, Orb, Particle, PowerUp, TapOutcome,
    resolve_tap, tick,
};
use crate::tuning::Tuning;

/// Event callback
pub type Listener = Box<dyn FnMut(&GameEvent)>;

/// Handle returned by [`Engine::add_event_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Keyboard input the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Pause toggle
    Space,
    /// Start from the menu or after game over
    Enter,
}

/// Read-only copy of everything a renderer or HUD needs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub stats: GameStats,
    pub orbs: Vec<Orb>,
    pub wheels: Vec<ColorWheel>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub struct Engine {
    state: GameState,
    store: Box<dyn HighScoreStore>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    /// Timestamp of the previous frame (ms)
    last_frame_ms: Option<f64>,
    /// Delta time integrated by the previous frame (s)
    last_dt: f32,
    /// Frame loop active (set by `start_game`, cleared by `destroy`)
    running: bool,
    /// Input detached until the next `start_game`
    destroyed: bool,
}

impl Engine {
    /// Engine with default balance, a random seed and an in-memory high score
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::with_tuning(
            Tuning::for_playfield(width, height),
            rand::random(),
            Box::new(MemoryStore::new()),
        )
    }

    /// Fully specified engine; the same seed and inputs replay the same game
    pub fn with_tuning(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                0
            }
        };
        log::info!(
            "Engine created: {}x{} playfield, seed {}, high score {}",
            tuning.playfield.width,
            tuning.playfield.height,
            seed,
            high_score
        );

        Ok(Self {
            state: GameState::new(tuning, seed, high_score),
            store,
            listeners: Vec::new(),
            next_listener_id: 1,
            last_frame_ms: None,
            last_dt: 0.0,
            running: false,
            destroyed: false,
        })
    }

    /// Reset the session and enter `Playing`
    pub fn start_game(&mut self) {
        self.state.reset_session();
        self.state.phase = GamePhase::Playing;
        self.running = true;
        self.destroyed = false;
        self.last_frame_ms = None;
        log::info!("Game started");
    }

    /// Toggle between `Playing` and `Paused`; no effect in other phases
    pub fn pause_game(&mut self) {
        if self.destroyed {
            return;
        }
        self.state.phase = match self.state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => {
                log::debug!("pause ignored in {:?}", other);
                return;
            }
        };
        log::info!("Phase -> {:?}", self.state.phase);
    }

    /// Stop the frame loop, detach input and drop every listener
    ///
    /// Nothing runs until `start_game` is called again. Calling this twice
    /// is harmless.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            log::info!("Engine destroyed");
        }
        self.running = false;
        self.destroyed = true;
        self.listeners.clear();
        self.state.events.clear();
    }

    /// Run one display frame at `timestamp_ms`, returning the delta time used
    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        if !self.running {
            return 0.0;
        }
        let dt = match self.last_frame_ms {
            Some(last) => frame_dt(timestamp_ms - last),
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        self.last_dt = dt;

        tick(&mut self.state, timestamp_ms, dt);
        self.flush_events();
        dt
    }

    /// A tap or click in playfield coordinates
    ///
    /// Starts a game from the menu or game-over screen, resolves a match
    /// while playing, and is ignored while paused.
    pub fn submit_pointer_input(&mut self, x: f32, y: f32, timestamp_ms: f64) -> TapOutcome {
        if self.destroyed {
            return TapOutcome::Ignored;
        }
        match self.state.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.start_game();
                TapOutcome::Ignored
            }
            GamePhase::Playing => {
                let outcome = resolve_tap(&mut self.state, Vec2::new(x, y));
                log::trace!("tap ({:.0}, {:.0}) at {:.0}ms: {:?}", x, y, timestamp_ms, outcome);
                self.flush_events();
                outcome
            }
            GamePhase::Paused => TapOutcome::Ignored,
        }
    }

    pub fn submit_key(&mut self, key: Key) {
        if self.destroyed {
            return;
        }
        match (key, self.state.phase) {
            (Key::Space, GamePhase::Playing | GamePhase::Paused) => self.pause_game(),
            (Key::Enter, GamePhase::Menu | GamePhase::GameOver) => self.start_game(),
            _ => {}
        }
    }

    /// Register a listener; it is called for every event until removed
    pub fn add_event_listener(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn stats(&self) -> &GameStats {
        &self.state.stats
    }

    /// Read-only view of the live simulation
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Delta time integrated by the most recent frame (s)
    pub fn last_delta(&self) -> f32 {
        self.last_dt
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            width: self.state.tuning.playfield.width,
            height: self.state.tuning.playfield.height,
            stats: self.state.stats.clone(),
            orbs: self.state.orbs.clone(),
            wheels: self.state.wheels.clone(),
            power_ups: self.state.power_ups.clone(),
            particles: self.state.particles.clone(),
        }
    }

    /// Deliver queued events, saving a new high score before anyone sees game over
    fn flush_events(&mut self) {
        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            if let GameEvent::GameOver {
                final_score,
                new_high_score: true,
            } = event
            {
                self.persist_high_score(*final_score);
            }
            for (_, listener) in self.listeners.iter_mut() {
                listener(event);
            }
        }
    }

    fn persist_high_score(&mut self, score: u64) {
        if let Err(e) = self.store.save(score) {
            log::warn!("Could not save high score {}: {}", score, e);
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use crate::sim::{Color, MissCause, choose_tap};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine_with(store: MemoryStore) -> Engine {
        Engine::with_tuning(Tuning::for_playfield(400.0, 600.0), 2024, Box::new(store)).unwrap()
    }

    fn recorder(engine: &mut Engine) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        engine.add_event_listener(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    fn place_orb(engine: &mut Engine, pos: Vec2, color: Color, lifetime: f32) -> u32 {
        let id = engine.state.next_entity_id();
        engine.state.orbs.push(Orb {
            id,
            pos,
            vel: Vec2::ZERO,
            color,
            radius: 20.0,
            lifetime,
            max_lifetime: 5000.0,
        });
        id
    }

    /// Store that fails every call
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u64, PersistError> {
            Err(PersistError::Unavailable("test"))
        }
        fn save(&mut self, _score: u64) -> Result<(), PersistError> {
            Err(PersistError::Unavailable("test"))
        }
    }

    /// Store that counts saves
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: MemoryStore,
        saves: Rc<RefCell<u32>>,
    }

    impl HighScoreStore for CountingStore {
        fn load(&self) -> Result<u64, PersistError> {
            self.inner.load()
        }
        fn save(&mut self, score: u64) -> Result<(), PersistError> {
            *self.saves.borrow_mut() += 1;
            self.inner.save(score)
        }
    }

    #[test]
    fn test_construction() {
        let engine = Engine::new(400.0, 600.0).unwrap();
        assert_eq!(engine.phase(), GamePhase::Menu);
        assert_eq!(engine.stats().lives, 3);
        assert_eq!(engine.stats().achievements.len(), 5);
        assert_eq!(engine.state().wheels.len(), 2);
        assert!(!engine.is_running());

        assert!(matches!(
            Engine::new(0.0, 600.0),
            Err(ConfigError::InvalidPlayfield { .. })
        ));
        assert!(Engine::new(400.0, -1.0).is_err());
    }

    #[test]
    fn test_tap_in_menu_starts_game() {
        let mut engine = engine_with(MemoryStore::new());
        assert_eq!(engine.submit_pointer_input(10.0, 10.0, 0.0), TapOutcome::Ignored);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.is_running());
    }

    #[test]
    fn test_match_scenario() {
        let mut engine = engine_with(MemoryStore::new());
        let events = recorder(&mut engine);
        engine.start_game();

        let center = engine.state().wheels[0].pos;
        let orb_id = place_orb(&mut engine, center, Color::from_hex("#FF6B6B").unwrap(), 5000.0);
        let outcome = engine.submit_pointer_input(center.x, center.y, 0.0);

        assert!(matches!(outcome, TapOutcome::Matched { points: 10, .. }));
        assert_eq!(engine.stats().score, 10);
        assert_eq!(engine.stats().combo, 1);
        assert!(engine.state().orbs.iter().all(|o| o.id != orb_id));
        match &events.borrow()[0] {
            GameEvent::OrbMatched { orb, points, .. } => {
                assert_eq!(orb.id, orb_id);
                assert_eq!(*points, 10);
            }
            other => panic!("unexpected first event {:?}", other),
        }
    }

    #[test]
    fn test_last_life_scenario() {
        let mut engine = engine_with(MemoryStore::new());
        let events = recorder(&mut engine);
        engine.start_game();
        engine.state.stats.lives = 1;
        engine.state.stats.score = 40;
        place_orb(&mut engine, Vec2::new(200.0, 100.0), Color(0xFF6B6B), 5.0);

        engine.frame(0.0);
        assert_eq!(engine.phase(), GamePhase::Playing, "dt is zero on the first frame");
        engine.frame(16.0);

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.stats().lives, 0);
        let events = events.borrow();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::OrbMissed {
                cause: MissCause::Expired,
                ..
            }
        )));
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                final_score: 40,
                new_high_score: true
            })
        );
    }

    #[test]
    fn test_pause_suspends_simulation() {
        let mut engine = engine_with(MemoryStore::new());
        engine.start_game();
        engine.frame(0.0);
        engine.frame(16.0);
        let rotation = engine.state().wheels[0].rotation;

        engine.submit_key(Key::Space);
        assert_eq!(engine.phase(), GamePhase::Paused);
        engine.frame(32.0);
        engine.frame(48.0);
        assert_eq!(engine.state().wheels[0].rotation, rotation);

        let center = engine.state().wheels[0].pos;
        assert_eq!(
            engine.submit_pointer_input(center.x, center.y, 50.0),
            TapOutcome::Ignored
        );

        engine.pause_game();
        assert_eq!(engine.phase(), GamePhase::Playing);
        engine.frame(64.0);
        assert!(engine.state().wheels[0].rotation > rotation);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut engine = engine_with(MemoryStore::new());
        engine.pause_game();
        assert_eq!(engine.phase(), GamePhase::Menu);
        engine.submit_key(Key::Space);
        assert_eq!(engine.phase(), GamePhase::Menu);
        engine.submit_key(Key::Enter);
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut engine = engine_with(MemoryStore::new());
        engine.start_game();
        engine.frame(0.0);
        engine.state.stats.score = 300;
        engine.state.stats.level = 2;
        engine.state.stats.lives = 1;
        crate::sim::tick::game_over(&mut engine.state);

        engine.submit_key(Key::Enter);
        assert_eq!(engine.phase(), GamePhase::Playing);
        let stats = engine.stats();
        assert_eq!((stats.score, stats.lives, stats.level, stats.combo), (0, 3, 1, 0));
        assert_eq!(stats.high_score, 300);
        assert!(engine.state().orbs.is_empty());
        assert!(engine.state().particles.is_empty());
    }

    #[test]
    fn test_delta_clamped_after_stall() {
        let mut engine = engine_with(MemoryStore::new());
        engine.start_game();
        assert_eq!(engine.frame(1000.0), 0.0);
        assert_eq!(engine.frame(6000.0), 1.0 / 30.0);
        assert!((engine.frame(6010.0) - 0.01).abs() < 1e-6);
        assert!((engine.last_delta() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_listener_order_and_removal() {
        let mut engine = engine_with(MemoryStore::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&calls), Rc::clone(&calls));
        let first = engine.add_event_listener(move |_| a.borrow_mut().push("first"));
        engine.add_event_listener(move |_| b.borrow_mut().push("second"));

        engine.start_game();
        engine.state.stats.score = 200;
        engine.frame(0.0);
        assert_eq!(calls.borrow()[..2], ["first", "second"]);

        assert!(engine.remove_event_listener(first));
        assert!(!engine.remove_event_listener(first));

        calls.borrow_mut().clear();
        engine.state.stats.score = 400;
        engine.frame(16.0);
        assert!(!calls.borrow().is_empty());
        assert!(calls.borrow().iter().all(|c| *c == "second"));
    }

    #[test]
    fn test_destroy_silences_everything() {
        let mut engine = engine_with(MemoryStore::new());
        let events = recorder(&mut engine);
        engine.start_game();
        engine.destroy();
        engine.destroy();

        engine.state.stats.score = 200;
        assert_eq!(engine.frame(0.0), 0.0);
        engine.submit_key(Key::Enter);
        let center = engine.state().wheels[0].pos;
        assert_eq!(
            engine.submit_pointer_input(center.x, center.y, 0.0),
            TapOutcome::Ignored
        );
        assert!(!engine.is_running());
        assert!(events.borrow().is_empty());
        assert_eq!(engine.state().stats.level, 1);

        // Old listeners stay detached after a restart
        engine.start_game();
        assert!(engine.is_running());
        engine.state.stats.score = 200;
        engine.frame(16.0);
        assert_eq!(engine.stats().level, 2);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_high_score_survives_reconstruct() {
        let store = CountingStore::default();

        let mut engine = Engine::with_tuning(
            Tuning::for_playfield(400.0, 600.0),
            1,
            Box::new(store.clone()),
        )
        .unwrap();
        engine.start_game();
        engine.state.stats.score = 150;
        crate::sim::tick::game_over(&mut engine.state);
        engine.flush_events();
        engine.destroy();
        assert_eq!(store.inner.stored(), Some(150));
        assert_eq!(*store.saves.borrow(), 1);

        let mut engine = Engine::with_tuning(
            Tuning::for_playfield(400.0, 600.0),
            2,
            Box::new(store.clone()),
        )
        .unwrap();
        assert_eq!(engine.stats().high_score, 150);
        engine.start_game();
        engine.state.stats.score = 90;
        crate::sim::tick::game_over(&mut engine.state);
        engine.flush_events();
        assert_eq!(*store.saves.borrow(), 1, "lower score is not saved");
        assert_eq!(engine.stats().high_score, 150);
    }

    #[test]
    fn test_storage_failures_swallowed() {
        let mut engine =
            Engine::with_tuning(Tuning::for_playfield(400.0, 600.0), 3, Box::new(BrokenStore))
                .unwrap();
        assert_eq!(engine.stats().high_score, 0);
        engine.start_game();
        engine.state.stats.score = 10;
        crate::sim::tick::game_over(&mut engine.state);
        engine.flush_events();
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_seeded_engines_replay_identically() {
        fn run(seed: u64) -> String {
            let mut engine = Engine::with_tuning(
                Tuning::for_playfield(400.0, 600.0),
                seed,
                Box::new(MemoryStore::new()),
            )
            .unwrap();
            engine.start_game();
            for i in 0..600 {
                let ts = i as f64 * 1000.0 / 60.0;
                engine.frame(ts);
                if let Some(tap) = choose_tap(engine.state()) {
                    engine.submit_pointer_input(tap.x, tap.y, ts);
                }
            }
            engine.snapshot().to_json().unwrap()
        }
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_snapshot_json() {
        let engine = engine_with(MemoryStore::new());
        let json: serde_json::Value =
            serde_json::from_str(&engine.snapshot().to_json().unwrap()).unwrap();
        assert_eq!(json["phase"], "Menu");
        assert_eq!(json["stats"]["lives"], 3);
        assert_eq!(json["wheels"][0]["colors"][0], "#FF6B6B");
        assert_eq!(json["stats"]["achievements"][1]["id"], "combo_5");
    }

    proptest! {
        #[test]
        fn prop_frame_delta_bounded(gaps in proptest::collection::vec(-100.0f64..10_000.0, 1..50)) {
            let mut engine = engine_with(MemoryStore::new());
            engine.start_game();
            let mut ts = 0.0;
            for gap in gaps {
                ts += gap;
                let dt = engine.frame(ts);
                prop_assert!((0.0..=1.0 / 30.0).contains(&dt));
            }
        }

        #[test]
        fn prop_lives_and_combo_invariants(taps in proptest::collection::vec((0.0f32..400.0, 0.0f32..600.0), 0..40)) {
            let mut engine = engine_with(MemoryStore::new());
            engine.start_game();
            let mut last_score = 0;
            for (i, (x, y)) in taps.into_iter().enumerate() {
                let ts = i as f64 * 50.0;
                engine.frame(ts);
                if engine.phase() != GamePhase::Playing {
                    break;
                }
                let lives = engine.stats().lives;
                let outcome = engine.submit_pointer_input(x, y, ts);
                let stats = engine.stats();
                prop_assert!(stats.score >= last_score);
                prop_assert_eq!(stats.lives, lives, "taps never cost a life");
                if matches!(outcome, TapOutcome::Missed { .. }) {
                    prop_assert_eq!(stats.combo, 0);
                }
                last_score = stats.score;
            }
        }
    }
}
