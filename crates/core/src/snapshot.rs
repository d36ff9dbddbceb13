//! Read-only views handed to renderers.
//!
//! Snapshots are plain copies; drawing one can never mutate engine state.

use crate::types::{Cell, Direction, Point, ShapeId, Status, TWENTY48_SIZE};

/// The falling Tetris piece in absolute board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub cells: [(i16, i16); 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrisSnapshot {
    pub width: u8,
    pub height: u8,
    /// Settled cells, row-major
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next_shape: ShapeId,
    pub lines_removed: u32,
    pub score: u32,
    pub fall_interval_ms: u32,
    pub status: Status,
}

impl TetrisSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board[y * self.width as usize + x]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Twenty48Snapshot {
    pub board: [[u32; TWENTY48_SIZE]; TWENTY48_SIZE],
    pub score: u32,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub width: u8,
    pub height: u8,
    /// Head first
    pub body: Vec<Point>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub deaths: u32,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSnapshot {
    Tetris(TetrisSnapshot),
    Twenty48(Twenty48Snapshot),
    Snake(SnakeSnapshot),
}

impl GameSnapshot {
    pub fn status(&self) -> Status {
        match self {
            GameSnapshot::Tetris(s) => s.status,
            GameSnapshot::Twenty48(s) => s.status,
            GameSnapshot::Snake(s) => s.status,
        }
    }

    /// Score as shown to the player
    pub fn score(&self) -> u32 {
        match self {
            GameSnapshot::Tetris(s) => s.score,
            GameSnapshot::Twenty48(s) => s.score,
            GameSnapshot::Snake(s) => s.body.len().saturating_sub(1) as u32,
        }
    }
}
