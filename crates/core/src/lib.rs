//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and state of the three grid games. It has
//! **no dependencies** on terminals, timers or threads:
//!
//! - **Deterministic**: every random draw goes through a [`RandomSource`], so a
//!   seed (or a scripted sequence in tests) reproduces a game exactly
//! - **Run-to-completion**: each tick or command is applied atomically and
//!   reported as an [`Outcome`]
//! - **Timer-free**: engines only *request* tick schedule changes; the runtime
//!   owns the clock
//!
//! # Module Structure
//!
//! - [`board`]: Tetris well with collision queries and row removal
//! - [`game`]: the [`GameEngine`] contract shared by all games
//! - [`pieces`]: tetromino shapes and right rotation
//! - [`rng`]: seedable and scripted random sources
//! - [`snake`]: Snake movement, growth and collisions
//! - [`snapshot`]: read-only views handed to renderers
//! - [`tetris`]: falling pieces, line removal and speed-up
//! - [`twenty48`]: sliding, merging and tile spawning
//!
//! # Example
//!
//! ```
//! use grid_games_core::{GameEngine, TetrisEngine};
//! use grid_games_core::types::{Command, Status};
//!
//! let mut game = TetrisEngine::default();
//! game.start();
//!
//! game.command(Command::MoveRight);
//! game.command(Command::RotateRight);
//! game.tick();
//!
//! assert_eq!(game.status(), Status::Running);
//! ```

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod snake;
pub mod snapshot;
pub mod tetris;
pub mod twenty48;

pub use grid_games_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game::{GameEngine, Outcome, TickChange};
pub use pieces::Piece;
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use snake::{SnakeConfig, SnakeEngine};
pub use snapshot::{GameSnapshot, SnakeSnapshot, TetrisSnapshot, Twenty48Snapshot};
pub use tetris::{TetrisConfig, TetrisEngine};
pub use twenty48::Twenty48Engine;

use types::{GameKind, TetrisPreset};

/// Build a boxed engine for `kind`, seeded with `seed`.
///
/// `preset` only affects Tetris.
pub fn build_engine(kind: GameKind, preset: TetrisPreset, seed: u32) -> Box<dyn GameEngine + Send> {
    let rng = SimpleRng::new(seed);
    match kind {
        GameKind::Tetris => Box::new(TetrisEngine::new(TetrisConfig::from_preset(preset), rng)),
        GameKind::Twenty48 => Box::new(Twenty48Engine::new(rng)),
        GameKind::Snake => Box::new(SnakeEngine::new(SnakeConfig::default(), rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_engine_matches_kind() {
        for kind in [GameKind::Tetris, GameKind::Twenty48, GameKind::Snake] {
            let engine = build_engine(kind, TetrisPreset::Classic, 7);
            assert_eq!(engine.kind(), kind);
            assert_eq!(engine.status(), types::Status::NotStarted);
        }
    }

    #[test]
    fn build_engine_applies_preset() {
        let engine = build_engine(GameKind::Tetris, TetrisPreset::Wide, 7);
        match engine.snapshot() {
            GameSnapshot::Tetris(s) => assert_eq!((s.width, s.height), (16, 22)),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }
}
