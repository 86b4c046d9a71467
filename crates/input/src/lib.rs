//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]s. It holds no
//! state of its own; the caller passes the session state so context-dependent
//! keys (pause toggle, start) resolve correctly.

pub mod map;

pub use alpha_tetris_types as types;

pub use map::{handle_key_event, should_quit};
