//! Terminal input for the tetrino engine.
//!
//! Maps `crossterm` key events onto [`crate::types::Command`] edges and stamps
//! them with the frame they belong to. Auto-repeat and timing live in the engine,
//! so this crate stays stateless apart from a redraw latch.

pub mod handler;
pub mod map;

pub use tetrino_types as types;

pub use handler::InputCollector;
pub use map::{handle_key_event, KeyAction};
