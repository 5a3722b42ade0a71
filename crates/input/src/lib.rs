//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`]. The engine
//! only ever sees the five actions; key repeat is left to the terminal.

pub mod map;

pub use fieldtris_types as types;

pub use map::{handle_key_event, should_quit};
