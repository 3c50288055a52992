//! JSON event queue for hosts that poll once per frame

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{Engine, ListenerId};

/// Buffers engine events as JSON strings until the host drains them
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Rc<RefCell<Vec<String>>>,
    listener: Option<ListenerId>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register on `engine`, replacing any earlier registration
    ///
    /// `Engine::destroy` drops every listener, so hosts call this again after
    /// restarting a destroyed engine.
    pub fn attach(&mut self, engine: &mut Engine) {
        if let Some(id) = self.listener.take() {
            engine.remove_event_listener(id);
        }
        let queue = Rc::clone(&self.pending);
        let id = engine.add_event_listener(move |event| match serde_json::to_string(event) {
            Ok(json) => queue.borrow_mut().push(json),
            Err(e) => log::warn!("Dropping unserializable event: {}", e),
        });
        self.listener = Some(id);
    }

    /// Forget the registration and anything not yet drained
    pub fn detach(&mut self) {
        self.listener = None;
        self.pending.borrow_mut().clear();
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Events since the last drain, as a JSON array
    pub fn take_json(&self) -> String {
        let events = std::mem::take(&mut *self.pending.borrow_mut());
        format!("[{}]", events.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    fn engine() -> Engine {
        Engine::with_tuning(Tuning::for_playfield(400.0, 600.0), 11, Box::new(MemoryStore::new()))
            .unwrap()
    }

    /// Tap the orb spawned above the playfield; no wheel reaches it
    fn raise_miss(engine: &mut Engine, ts: f64) {
        engine.frame(ts);
        let orb = engine.state().orbs.last().unwrap().pos;
        engine.submit_pointer_input(orb.x, orb.y, ts);
    }

    fn count(json: &str, kind: &str) -> usize {
        let events: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
        events.iter().filter(|e| e["type"] == kind).count()
    }

    #[test]
    fn test_drains_as_json_array() {
        let mut engine = engine();
        let mut queue = EventQueue::new();
        queue.attach(&mut engine);
        assert_eq!(queue.take_json(), "[]");

        engine.start_game();
        raise_miss(&mut engine, 0.0);
        let json = queue.take_json();
        assert_eq!(count(&json, "ORB_MISSED"), 1);
        assert_eq!(queue.take_json(), "[]");
    }

    #[test]
    fn test_reattach_after_destroy_and_restart() {
        let mut engine = engine();
        let mut queue = EventQueue::new();
        queue.attach(&mut engine);

        engine.start_game();
        engine.destroy();
        queue.detach();
        assert!(!queue.is_attached());

        engine.start_game();
        queue.attach(&mut engine);
        queue.attach(&mut engine);
        raise_miss(&mut engine, 0.0);

        assert!(queue.is_attached());
        assert_eq!(count(&queue.take_json(), "ORB_MISSED"), 1, "one registration only");
    }
}
