//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views paint snapshots into a
//! framebuffer, and the renderer flushes framebuffers to the terminal as
//! diffs. No widget or layout library is involved.
//!
//! Goals:
//! - Keep `core` free of any terminal concern
//! - Allow precise control over aspect ratio (2 chars wide per grid cell)
//! - Emit only what changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use grid_games_core as core;
pub use grid_games_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
