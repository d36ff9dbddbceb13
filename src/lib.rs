//! Grid games (workspace facade crate).
//!
//! Re-exports the member crates under one roof and hosts the pieces the
//! binary wires together: configuration, logging setup and the terminal
//! frontend.

pub mod app;
pub mod config;
pub mod frontend;
pub mod logging;

pub use grid_games_core as core;
pub use grid_games_engine as engine;
pub use grid_games_input as input;
pub use grid_games_term as term;
pub use grid_games_types as types;
