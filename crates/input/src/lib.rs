//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. Nothing here
//! knows which game is running; every game interprets the same command set.

pub mod map;

pub use grid_games_types as types;

pub use map::{handle_key_event, should_quit};
