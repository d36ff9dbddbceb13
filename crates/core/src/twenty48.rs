//! 2048 engine - slide, merge and spawn on a 4x4 board
//!
//! Every direction reduces to one primitive, [`slide_left`], applied per row:
//! compact, merge adjacent equal pairs once, compact again. Right reflects each
//! row around it; Up and Down transpose the board around Left and Right.
//! The row primitives are pure and report what they did through their return
//! values, so the engine never keeps hidden per-move flags.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::game::{GameEngine, Outcome};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{GameSnapshot, Twenty48Snapshot};
use crate::types::*;

const N: usize = TWENTY48_SIZE;

/// One row (or transposed column) of tiles; 0 is empty
pub type Row = [u32; N];

/// Row-major board
pub type Grid = [[u32; N]; N];

/// What sliding one row did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowMove {
    pub row: Row,
    /// Cell order changed while compacting
    pub moved: bool,
    /// At least one pair merged
    pub merged: bool,
    /// Sum of the merged (doubled) values
    pub gained: u32,
}

/// Push non-zero tiles to the front, keeping their order.
///
/// Returns the compacted row and whether it differs from the input.
pub fn compact(row: Row) -> (Row, bool) {
    let tiles: ArrayVec<u32, N> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut out = [0u32; N];
    out[..tiles.len()].copy_from_slice(&tiles);
    (out, out != row)
}

/// Merge equal neighbours of a compacted row, left to right.
///
/// A merged tile is skipped together with the cell it absorbed, so no tile
/// takes part in more than one merge per move. Scanning stops at the first
/// empty cell.
pub fn merge_adjacent(mut row: Row) -> (Row, u32, bool) {
    let mut gained = 0u32;
    let mut merged = false;
    let (mut i, mut j) = (0usize, 1usize);

    while j < N {
        if row[i] != row[j] {
            i += 1;
            j += 1;
        } else if row[i] == 0 {
            break;
        } else {
            row[i] *= 2;
            gained += row[i];
            row[j] = 0;
            merged = true;
            i += 2;
            j += 2;
        }
    }

    (row, gained, merged)
}

/// compact -> merge -> compact
pub fn slide_left(row: Row) -> RowMove {
    let (row, moved_first) = compact(row);
    let (row, gained, merged) = merge_adjacent(row);
    let (row, moved_second) = compact(row);
    RowMove {
        row,
        moved: moved_first || moved_second,
        merged,
        gained,
    }
}

/// Reflect, slide left, reflect back
pub fn slide_right(row: Row) -> RowMove {
    let mut reversed = row;
    reversed.reverse();
    let mut result = slide_left(reversed);
    result.row.reverse();
    result
}

pub fn transpose(grid: &Grid) -> Grid {
    let mut out = [[0u32; N]; N];
    for (r, row) in grid.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][r] = v;
        }
    }
    out
}

/// Effect of one directional move on the whole board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub moved: bool,
    pub merged: bool,
    pub gained: u32,
    /// Where the new tile went, if one spawned
    pub spawned: Option<(usize, usize)>,
}

impl MoveResult {
    /// A move counts when something slid or merged
    pub fn effective(&self) -> bool {
        self.moved || self.merged
    }
}

fn slide_rows(grid: &Grid, slide: fn(Row) -> RowMove) -> (Grid, MoveResult) {
    let mut out = *grid;
    let mut result = MoveResult::default();
    for (dst, &src) in out.iter_mut().zip(grid.iter()) {
        let m = slide(src);
        *dst = m.row;
        result.moved |= m.moved;
        result.merged |= m.merged;
        result.gained += m.gained;
    }
    (out, result)
}

/// Slide the whole board in `dir` without spawning.
pub fn apply_direction(grid: &Grid, dir: Direction) -> (Grid, MoveResult) {
    match dir {
        Direction::Left => slide_rows(grid, slide_left),
        Direction::Right => slide_rows(grid, slide_right),
        Direction::Up => {
            let (t, result) = slide_rows(&transpose(grid), slide_left);
            (transpose(&t), result)
        }
        Direction::Down => {
            let (t, result) = slide_rows(&transpose(grid), slide_right);
            (transpose(&t), result)
        }
    }
}

/// Board has no empty cell.
///
/// This is the only game-over test: a full board that still holds an adjacent
/// equal pair is reported as full all the same.
pub fn board_full(grid: &Grid) -> bool {
    grid.iter().all(|row| row.iter().all(|&v| v != 0))
}

/// 2048 game state
#[derive(Debug, Clone)]
pub struct Twenty48Engine<R = SimpleRng> {
    board: Grid,
    score: u32,
    status: Status,
    rng: R,
}

impl<R: RandomSource> Twenty48Engine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            board: [[0; N]; N],
            score: 0,
            status: Status::NotStarted,
            rng,
        }
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// Replace the board, for setting up positions.
    pub fn set_board(&mut self, board: Grid) {
        self.board = board;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Fresh board with a single starting tile
    pub fn start(&mut self) -> Outcome {
        self.board = [[0; N]; N];
        self.score = 0;
        self.status = Status::Running;
        self.spawn_tile();
        info!("2048: start");
        Outcome::changed()
    }

    /// Put a new tile on a uniformly chosen empty cell.
    ///
    /// Empty cells are enumerated row-major; returns `None` when the board is
    /// full.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        let empty: ArrayVec<(usize, usize), { N * N }> = (0..N)
            .flat_map(|r| (0..N).map(move |c| (r, c)))
            .filter(|&(r, c)| self.board[r][c] == 0)
            .collect();

        if empty.is_empty() {
            return None;
        }

        let (r, c) = empty[self.rng.next_int(empty.len() as u32) as usize];
        self.board[r][c] = TWENTY48_SPAWN_VALUE;
        Some((r, c))
    }

    /// Apply one directional move.
    ///
    /// An effective move commits the new board, adds the merge gain to the
    /// score and spawns a tile. An ineffective move changes nothing and spawns
    /// nothing; if the board is also full the game is over.
    pub fn slide(&mut self, dir: Direction) -> MoveResult {
        if !self.status.is_running() {
            return MoveResult::default();
        }

        let (next, mut result) = apply_direction(&self.board, dir);
        if result.effective() {
            self.board = next;
            self.score += result.gained;
            result.spawned = self.spawn_tile();
            debug!(
                "2048: {:?} gained {} (score {})",
                dir, result.gained, self.score
            );
        } else if board_full(&self.board) {
            self.status = Status::GameOver;
            info!("2048: game over with score {}", self.score);
        }

        result
    }

    fn toggle_pause(&mut self) -> Outcome {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                Outcome::changed()
            }
            Status::Paused => {
                self.status = Status::Running;
                Outcome::changed()
            }
            Status::NotStarted | Status::GameOver => Outcome::unchanged(),
        }
    }
}

impl<R: RandomSource> GameEngine for Twenty48Engine<R> {
    fn kind(&self) -> GameKind {
        GameKind::Twenty48
    }

    fn start(&mut self) -> Outcome {
        Twenty48Engine::start(self)
    }

    /// 2048 is purely input driven.
    fn tick(&mut self) -> Outcome {
        Outcome::unchanged()
    }

    fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Pause => self.toggle_pause(),
            Command::Restart => Twenty48Engine::start(self),
            Command::RotateRight => Outcome::unchanged(),
            Command::MoveLeft | Command::MoveRight | Command::MoveUp | Command::MoveDown => {
                let Some(dir) = command.direction() else {
                    return Outcome::unchanged();
                };
                let before = self.status;
                let result = self.slide(dir);
                if result.effective() || self.status != before {
                    Outcome::changed()
                } else {
                    Outcome::unchanged()
                }
            }
        }
    }

    fn status(&self) -> Status {
        self.status
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::Twenty48(Twenty48Snapshot {
            board: self.board,
            score: self.score,
            status: self.status,
        })
    }
}

impl Default for Twenty48Engine<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}
