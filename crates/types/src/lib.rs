//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by every game in the bundle.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, runtime plumbing, terminal rendering).
//!
//! # Board Dimensions
//!
//! | Game | Width | Height | Notes |
//! |------|-------|--------|-------|
//! | Tetris | 10 | 22 | selectable through [`TetrisPreset`] |
//! | 2048 | 4 | 4 | fixed |
//! | Snake | 20 | 20 | fixed, occupancy derived from the body |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TETRIS_BASE_FALL_MS` | 300 | Fall interval at game start |
//! | `TETRIS_SPEEDUP_STEP_MS` | 50 | Interval reduction per speed-up |
//! | `TETRIS_LINES_PER_SPEEDUP` | 20 | Cumulative lines between speed-ups |
//! | `TETRIS_MIN_FALL_MS` | 50 | Fastest fall interval |
//! | `SNAKE_TICK_MS` | 350 | Snake advance interval |
//!
//! # Examples
//!
//! ```
//! use grid_games_types::{Command, Direction, GameKind, ShapeId, TetrisPreset};
//!
//! assert_eq!(GameKind::from_str("2048"), Some(GameKind::Twenty48));
//! assert_eq!(ShapeId::from_id(5), Some(ShapeId::Square));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert_eq!(TetrisPreset::Classic.dimensions(), (10, 22));
//! assert_eq!(Command::from_str("rotateRight"), Some(Command::RotateRight));
//! ```

/// Classic Tetris board width in cells
pub const TETRIS_BOARD_WIDTH: u8 = 10;

/// Classic Tetris board height in cells
pub const TETRIS_BOARD_HEIGHT: u8 = 22;

/// Fall interval at the start of a Tetris game
pub const TETRIS_BASE_FALL_MS: u32 = 300;

/// Fall interval reduction applied on every speed-up
pub const TETRIS_SPEEDUP_STEP_MS: u32 = 50;

/// Cumulative lines removed between two speed-ups
pub const TETRIS_LINES_PER_SPEEDUP: u32 = 20;

/// Floor for the fall interval (speed-ups stop here)
pub const TETRIS_MIN_FALL_MS: u32 = 50;

/// Points shown per removed line
pub const LINE_SCORE_MULTIPLIER: u32 = 100;

/// 2048 board edge length (the board is square)
pub const TWENTY48_SIZE: usize = 4;

/// Value of every freshly spawned 2048 tile
pub const TWENTY48_SPAWN_VALUE: u32 = 2;

/// Snake grid width
pub const SNAKE_BOARD_WIDTH: u8 = 20;

/// Snake grid height
pub const SNAKE_BOARD_HEIGHT: u8 = 20;

/// Snake advance interval
pub const SNAKE_TICK_MS: u32 = 350;


/// Lifecycle state shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "ready",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::GameOver => "game over",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}

/// Which game a session is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Tetris,
    Twenty48,
    Snake,
}

impl GameKind {
    /// Parse a game name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_games_types::GameKind;
    ///
    /// assert_eq!(GameKind::from_str("Tetris"), Some(GameKind::Tetris));
    /// assert_eq!(GameKind::from_str("snake"), Some(GameKind::Snake));
    /// assert_eq!(GameKind::from_str("minesweeper"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tetris" => Some(GameKind::Tetris),
            "2048" | "twenty48" => Some(GameKind::Twenty48),
            "snake" => Some(GameKind::Snake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Tetris => "tetris",
            GameKind::Twenty48 => "2048",
            GameKind::Snake => "snake",
        }
    }
}

/// Board size presets selectable at Tetris startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TetrisPreset {
    /// 10 columns x 22 rows
    #[default]
    Classic,
    /// 8 columns x 16 rows
    Compact,
    /// 16 columns x 22 rows
    Wide,
}

impl TetrisPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(TetrisPreset::Classic),
            "compact" => Some(TetrisPreset::Compact),
            "wide" => Some(TetrisPreset::Wide),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TetrisPreset::Classic => "classic",
            TetrisPreset::Compact => "compact",
            TetrisPreset::Wide => "wide",
        }
    }

    /// `(width, height)` in cells
    pub fn dimensions(&self) -> (u8, u8) {
        match self {
            TetrisPreset::Classic => (TETRIS_BOARD_WIDTH, TETRIS_BOARD_HEIGHT),
            TetrisPreset::Compact => (8, 16),
            TetrisPreset::Wide => (16, 22),
        }
    }
}

/// Discrete commands delivered by the input router
///
/// The same command set drives every game; each engine decides what a command
/// means for it (e.g. `MoveUp` rotates in Tetris and turns the snake upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    RotateRight,
    /// Toggle pause
    Pause,
    /// Throw the current game away and start a fresh one
    Restart,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "moveup" => Some(Command::MoveUp),
            "movedown" => Some(Command::MoveDown),
            "rotateright" => Some(Command::RotateRight),
            "pause" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveUp => "moveUp",
            Command::MoveDown => "moveDown",
            Command::RotateRight => "rotateRight",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }

    /// Direction carried by a directional command
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Heading on the grid; y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Unit vector `(dx, dy)`
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// True for the direction itself and its reversal
    pub fn same_axis(&self, other: Direction) -> bool {
        *self == other || self.opposite() == other
    }
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The seven tetromino shapes
///
/// The discriminant doubles as the settled-cell color id on the Tetris board
/// (0 is reserved for an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Z = 1,
    S = 2,
    Line = 3,
    T = 4,
    Square = 5,
    L = 6,
    MirroredL = 7,
}

impl ShapeId {
    pub const ALL: [ShapeId; 7] = [
        ShapeId::Z,
        ShapeId::S,
        ShapeId::Line,
        ShapeId::T,
        ShapeId::Square,
        ShapeId::L,
        ShapeId::MirroredL,
    ];

    /// Color id written into settled cells (1..=7)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(ShapeId::Z),
            2 => Some(ShapeId::S),
            3 => Some(ShapeId::Line),
            4 => Some(ShapeId::T),
            5 => Some(ShapeId::Square),
            6 => Some(ShapeId::L),
            7 => Some(ShapeId::MirroredL),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::Z => "z",
            ShapeId::S => "s",
            ShapeId::Line => "i",
            ShapeId::T => "t",
            ShapeId::Square => "o",
            ShapeId::L => "l",
            ShapeId::MirroredL => "j",
        }
    }
}

/// A cell on the Tetris board: 0 = empty, 1..=7 = [`ShapeId`] color id
pub type Cell = u8;

/// Marker for an empty Tetris cell
pub const EMPTY: Cell = 0;
