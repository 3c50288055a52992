//! Platform glue
//!
//! Browser builds get a logging/panic hook on load and a small
//! JS-facing wrapper around [`crate::Engine`]. [`EventQueue`] is shared by
//! any host that polls events as JSON instead of registering callbacks; the
//! headless runner in `main.rs` drives the engine directly.

mod events;
#[cfg(target_arch = "wasm32")]
mod web;

pub use events::EventQueue;
#[cfg(target_arch = "wasm32")]
pub use web::WebGame;
