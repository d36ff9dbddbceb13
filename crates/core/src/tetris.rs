//! Tetris engine - falling piece, collision, locking and line removal
//!
//! This module ties together the board, the shape catalog and the random
//! source. It handles piece spawning, movement, rotation, line clears, the
//! speed-up schedule and the game lifecycle.
//!
//! Every legality decision goes through [`TetrisEngine::try_move`]; a move that
//! would leave the board or overlap a settled cell is rejected before anything
//! is mutated.

use log::{debug, info};

use crate::board::Board;
use crate::game::{GameEngine, Outcome, TickChange};
use crate::pieces::{shape_from_index, Piece};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TetrisSnapshot};
use crate::types::*;

/// Instance-scoped Tetris settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrisConfig {
    pub width: u8,
    pub height: u8,
    pub base_fall_ms: u32,
    pub speedup_step_ms: u32,
    pub lines_per_speedup: u32,
    pub min_fall_ms: u32,
}

impl TetrisConfig {
    pub fn from_preset(preset: TetrisPreset) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: TETRIS_BOARD_WIDTH,
            height: TETRIS_BOARD_HEIGHT,
            base_fall_ms: TETRIS_BASE_FALL_MS,
            speedup_step_ms: TETRIS_SPEEDUP_STEP_MS,
            lines_per_speedup: TETRIS_LINES_PER_SPEEDUP,
            min_fall_ms: TETRIS_MIN_FALL_MS,
        }
    }
}

/// Result of one line-removal pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    pub removed: u32,
    /// New fall interval when this pass crossed a speed-up threshold
    pub speedup: Option<u32>,
}

/// Complete Tetris game state
#[derive(Debug, Clone)]
pub struct TetrisEngine<R = SimpleRng> {
    config: TetrisConfig,
    board: Board,
    status: Status,
    piece: Option<Piece>,
    cur_x: i16,
    cur_y: i16,
    next_shape: ShapeId,
    lines_removed: u32,
    fall_interval_ms: u32,
    rng: R,
}

impl<R: RandomSource> TetrisEngine<R> {
    pub fn new(config: TetrisConfig, mut rng: R) -> Self {
        let next_shape = shape_from_index(rng.next_int(ShapeId::ALL.len() as u32));

        Self {
            config,
            board: Board::new(config.width, config.height),
            status: Status::NotStarted,
            piece: None,
            cur_x: 0,
            cur_y: 0,
            next_shape,
            lines_removed: 0,
            fall_interval_ms: config.base_fall_ms,
            rng,
        }
    }

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access to the settled cells, for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// Pivot position of the active piece
    pub fn position(&self) -> (i16, i16) {
        (self.cur_x, self.cur_y)
    }

    pub fn next_shape(&self) -> ShapeId {
        self.next_shape
    }

    pub fn lines_removed(&self) -> u32 {
        self.lines_removed
    }

    pub fn score(&self) -> u32 {
        self.lines_removed.saturating_mul(LINE_SCORE_MULTIPLIER)
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Reset the board and counters, then spawn the first piece
    pub fn start(&mut self) -> Outcome {
        self.board.clear();
        self.piece = None;
        self.lines_removed = 0;
        self.fall_interval_ms = self.config.base_fall_ms;
        self.status = Status::Running;
        info!(
            "tetris: start on {}x{} board",
            self.config.width, self.config.height
        );

        if self.spawn_piece() {
            Outcome::changed().with_tick(TickChange::Start(self.fall_interval_ms))
        } else {
            Outcome::changed().with_tick(TickChange::Stop)
        }
    }

    /// Bring `next_shape` onto the board at the top center.
    ///
    /// The pivot is placed so the piece's topmost cell lands on row 0. If that
    /// position is already blocked the game is over.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = Piece::new(self.next_shape);
        self.next_shape = shape_from_index(self.rng.next_int(ShapeId::ALL.len() as u32));

        let x = (self.config.width / 2) as i16;
        let y = -(piece.min_y() as i16);

        if !self.try_move(piece, x, y) {
            self.piece = None;
            self.status = Status::GameOver;
            info!(
                "tetris: game over, spawn blocked after {} lines",
                self.lines_removed
            );
            return false;
        }

        true
    }

    /// Place `piece` with its pivot at `(new_x, new_y)` if every cell is on the
    /// board and free. Commits and returns true; otherwise nothing changes.
    pub fn try_move(&mut self, piece: Piece, new_x: i16, new_y: i16) -> bool {
        let fits = piece
            .cells_at(new_x, new_y)
            .iter()
            .all(|&(x, y)| self.board.is_free(x, y));

        if !fits {
            return false;
        }

        self.piece = Some(piece);
        self.cur_x = new_x;
        self.cur_y = new_y;
        true
    }

    /// Rotate the active piece in place; no kicks.
    pub fn rotate_right(&mut self) -> bool {
        let Some(piece) = self.piece else {
            return false;
        };
        self.try_move(piece.rotate_right(), self.cur_x, self.cur_y)
    }

    /// Fall one row, locking the piece when it cannot.
    pub fn one_step_down(&mut self) -> Outcome {
        let Some(piece) = self.piece else {
            return Outcome::unchanged();
        };

        if self.try_move(piece, self.cur_x, self.cur_y + 1) {
            return Outcome::changed();
        }

        self.piece_dropped()
    }

    /// Settle the active piece, clear lines and spawn the next piece.
    pub fn piece_dropped(&mut self) -> Outcome {
        let Some(piece) = self.piece.take() else {
            return Outcome::unchanged();
        };

        let id = piece.shape().id();
        for (x, y) in piece.cells_at(self.cur_x, self.cur_y) {
            self.board.set(x, y, id);
        }

        let mut outcome = Outcome::changed();
        let clear = self.remove_full_lines();
        if let Some(interval) = clear.speedup {
            outcome = outcome.with_tick(TickChange::Start(interval));
        }

        if !self.spawn_piece() {
            outcome = outcome.with_tick(TickChange::Stop);
        }

        outcome
    }

    /// Remove all full rows and account for them.
    pub fn remove_full_lines(&mut self) -> LineClear {
        let removed = self.board.remove_full_rows() as u32;
        if removed == 0 {
            return LineClear::default();
        }

        let per_speedup = self.config.lines_per_speedup.max(1);
        let before = self.lines_removed / per_speedup;
        self.lines_removed += removed;
        let crossed = self.lines_removed / per_speedup - before;
        debug!(
            "tetris: removed {} line(s), total {}",
            removed, self.lines_removed
        );

        let mut speedup = None;
        if crossed > 0 {
            let next = self
                .fall_interval_ms
                .saturating_sub(self.config.speedup_step_ms.saturating_mul(crossed))
                .max(self.config.min_fall_ms);
            if next != self.fall_interval_ms {
                debug!(
                    "tetris: fall interval {}ms -> {}ms",
                    self.fall_interval_ms, next
                );
                self.fall_interval_ms = next;
                speedup = Some(next);
            }
        }

        LineClear { removed, speedup }
    }

    fn toggle_pause(&mut self) -> Outcome {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                Outcome::changed().with_tick(TickChange::Stop)
            }
            Status::Paused => {
                self.status = Status::Running;
                Outcome::changed().with_tick(TickChange::Start(self.fall_interval_ms))
            }
            Status::NotStarted | Status::GameOver => Outcome::unchanged(),
        }
    }

    fn moved(ok: bool) -> Outcome {
        if ok {
            Outcome::changed()
        } else {
            Outcome::unchanged()
        }
    }
}

impl<R: RandomSource> GameEngine for TetrisEngine<R> {
    fn kind(&self) -> GameKind {
        GameKind::Tetris
    }

    fn start(&mut self) -> Outcome {
        TetrisEngine::start(self)
    }

    fn tick(&mut self) -> Outcome {
        if !self.status.is_running() {
            return Outcome::unchanged();
        }
        self.one_step_down()
    }

    fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Pause => return self.toggle_pause(),
            Command::Restart => return TetrisEngine::start(self),
            _ => {}
        }

        if !self.status.is_running() {
            return Outcome::unchanged();
        }
        let Some(piece) = self.piece else {
            return Outcome::unchanged();
        };

        let (x, y) = (self.cur_x, self.cur_y);
        match command {
            Command::MoveLeft => Self::moved(self.try_move(piece, x - 1, y)),
            Command::MoveRight => Self::moved(self.try_move(piece, x + 1, y)),
            // Soft drop: one row per press, never locks.
            Command::MoveDown => Self::moved(self.try_move(piece, x, y + 1)),
            Command::MoveUp | Command::RotateRight => Self::moved(self.rotate_right()),
            Command::Pause | Command::Restart => Outcome::unchanged(),
        }
    }

    fn status(&self) -> Status {
        self.status
    }

    fn snapshot(&self) -> GameSnapshot {
        let active = self.piece.map(|piece| ActiveSnapshot {
            shape: piece.shape(),
            cells: piece.cells_at(self.cur_x, self.cur_y),
        });

        GameSnapshot::Tetris(TetrisSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.cells().to_vec(),
            active,
            next_shape: self.next_shape,
            lines_removed: self.lines_removed,
            score: self.score(),
            fall_interval_ms: self.fall_interval_ms,
            status: self.status,
        })
    }
}

impl Default for TetrisEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(TetrisConfig::default(), SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    /// Index 4 in the catalog is the square.
    fn squares_only() -> TetrisEngine<SequenceRng> {
        TetrisEngine::new(TetrisConfig::default(), SequenceRng::new(vec![4]))
    }

    fn fill_row_except(board: &mut Board, y: i16, holes: &[i16]) {
        for x in 0..board.width() as i16 {
            if !holes.contains(&x) {
                board.set(x, y, ShapeId::Line.id());
            }
        }
    }

    #[test]
    fn test_new_engine() {
        let engine = squares_only();
        assert_eq!(engine.status(), Status::NotStarted);
        assert!(engine.piece().is_none());
        assert_eq!(engine.next_shape(), ShapeId::Square);
        assert_eq!(engine.lines_removed(), 0);
        assert_eq!(engine.fall_interval_ms(), TETRIS_BASE_FALL_MS);
    }

    #[test]
    fn test_start_spawns_and_requests_ticks() {
        let mut engine = squares_only();
        let outcome = engine.start();

        assert_eq!(engine.status(), Status::Running);
        assert!(outcome.changed);
        assert_eq!(outcome.tick, Some(TickChange::Start(TETRIS_BASE_FALL_MS)));
        assert_eq!(engine.piece().map(|p| p.shape()), Some(ShapeId::Square));
        assert_eq!(engine.position(), (5, 0));
    }

    #[test]
    fn test_spawn_puts_topmost_cell_on_row_zero() {
        // Index 2 is the vertical line with offsets from y = -1 to y = 2.
        let mut engine = TetrisEngine::new(TetrisConfig::default(), SequenceRng::new(vec![2]));
        engine.start();

        let snap = match engine.snapshot() {
            GameSnapshot::Tetris(s) => s,
            _ => unreachable!(),
        };
        let cells = snap.active.unwrap().cells;
        assert_eq!(cells.iter().map(|c| c.1).min(), Some(0));
        assert_eq!(engine.position(), (5, 1));
    }

    #[test]
    fn test_start_clears_previous_board() {
        let mut engine = squares_only();
        engine.start();
        engine.board_mut().set(0, 21, 3);
        engine.lines_removed = 7;

        engine.start();
        assert!(engine.board().cells().iter().all(|&c| c == EMPTY));
        assert_eq!(engine.lines_removed(), 0);
    }

    #[test]
    fn test_try_move_rejects_walls_floor_and_settled_cells() {
        let mut engine = squares_only();
        engine.start();
        let piece = engine.piece().unwrap();

        assert!(!engine.try_move(piece, -1, 5));
        assert!(!engine.try_move(piece, 9, 5)); // right column would be x = 10
        assert!(!engine.try_move(piece, 4, 21)); // bottom row would be y = 22
        assert!(!engine.try_move(piece, 4, -1));

        engine.board_mut().set(5, 11, 1);
        assert!(!engine.try_move(piece, 4, 10));

        // Nothing above committed.
        assert_eq!(engine.position(), (5, 0));

        assert!(engine.try_move(piece, 0, 20));
        assert_eq!(engine.position(), (0, 20));
    }

    #[test]
    fn test_rotation_without_room_keeps_piece() {
        // Index 3 is the T. Pin it against the floor where rotating would push a
        // cell to row 22.
        let mut engine = TetrisEngine::new(TetrisConfig::default(), SequenceRng::new(vec![3]));
        engine.start();
        let piece = engine.piece().unwrap();
        assert!(engine.try_move(piece, 5, 20));

        // Rotated T spans y -1..=1 around the pivot, which fits.
        assert!(engine.rotate_right());
        let rotated = engine.piece().unwrap();
        assert_ne!(rotated, piece);

        // Block the cell the next rotation needs.
        let next = rotated.rotate_right();
        let blocked = next
            .cells_at(5, 20)
            .into_iter()
            .find(|c| !rotated.cells_at(5, 20).contains(c))
            .unwrap();
        engine.board_mut().set(blocked.0, blocked.1, 1);

        assert!(!engine.rotate_right());
        assert_eq!(engine.piece(), Some(rotated));
    }

    #[test]
    fn test_tick_falls_then_locks() {
        let mut engine = squares_only();
        engine.start();

        for expected_y in 1..=20 {
            let outcome = GameEngine::tick(&mut engine);
            assert!(outcome.changed);
            assert_eq!(engine.position().1, expected_y);
        }

        // Bottom reached: this tick locks and spawns the next square.
        GameEngine::tick(&mut engine);
        assert_eq!(engine.board().get(5, 21), Some(ShapeId::Square.id()));
        assert_eq!(engine.board().get(6, 20), Some(ShapeId::Square.id()));
        assert_eq!(engine.position(), (5, 0));
    }

    #[test]
    fn test_lock_clears_completed_line() {
        let mut engine = squares_only();
        engine.start();
        fill_row_except(engine.board_mut(), 21, &[5, 6]);

        let piece = engine.piece().unwrap();
        assert!(engine.try_move(piece, 5, 20));
        let outcome = engine.one_step_down();

        assert!(outcome.changed);
        assert_eq!(engine.lines_removed(), 1);
        assert_eq!(engine.score(), LINE_SCORE_MULTIPLIER);
        // The square's upper half dropped into the bottom row.
        assert_eq!(engine.board().get(5, 21), Some(ShapeId::Square.id()));
        assert_eq!(engine.board().get(0, 21), Some(EMPTY));
        assert!(!engine.board().is_row_full(21));
    }

    #[test]
    fn test_speedup_every_twenty_lines() {
        let mut engine = squares_only();
        engine.start();
        engine.lines_removed = 19;
        fill_row_except(engine.board_mut(), 21, &[5, 6]);

        let piece = engine.piece().unwrap();
        assert!(engine.try_move(piece, 5, 20));
        let outcome = engine.piece_dropped();

        assert_eq!(engine.lines_removed(), 20);
        assert_eq!(engine.fall_interval_ms(), 250);
        assert_eq!(outcome.tick, Some(TickChange::Start(250)));
    }

    #[test]
    fn test_no_speedup_below_threshold() {
        let mut engine = squares_only();
        engine.start();
        fill_row_except(engine.board_mut(), 21, &[5, 6]);
        let piece = engine.piece().unwrap();
        assert!(engine.try_move(piece, 5, 20));

        let outcome = engine.piece_dropped();
        assert_eq!(outcome.tick, None);
        assert_eq!(engine.fall_interval_ms(), TETRIS_BASE_FALL_MS);
    }

    #[test]
    fn test_fall_interval_has_floor() {
        let mut engine = squares_only();
        engine.start();
        engine.fall_interval_ms = TETRIS_MIN_FALL_MS;
        engine.lines_removed = 39;
        fill_row_except(engine.board_mut(), 21, &[]);

        let clear = engine.remove_full_lines();
        assert_eq!(clear.removed, 1);
        assert_eq!(clear.speedup, None);
        assert_eq!(engine.fall_interval_ms(), TETRIS_MIN_FALL_MS);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut engine = squares_only();
        engine.start();
        engine.board_mut().set(5, 0, 1);

        assert!(!engine.spawn_piece());
        assert_eq!(engine.status(), Status::GameOver);
        assert!(engine.piece().is_none());

        // Nothing moves any more.
        assert_eq!(GameEngine::tick(&mut engine), Outcome::unchanged());
        assert_eq!(engine.command(Command::MoveLeft), Outcome::unchanged());
        assert_eq!(engine.command(Command::Pause), Outcome::unchanged());
    }

    #[test]
    fn test_lock_into_blocked_spawn_stops_ticks() {
        let mut engine = squares_only();
        engine.start();
        // Stack reaching the spawn rows, leaving the active square where it is.
        for y in 2..22 {
            engine.board_mut().set(5, y, 1);
        }

        let outcome = engine.one_step_down();
        assert_eq!(engine.status(), Status::GameOver);
        assert_eq!(outcome.tick, Some(TickChange::Stop));
    }

    #[test]
    fn test_directional_commands() {
        let mut engine = squares_only();
        engine.start();

        assert!(engine.command(Command::MoveLeft).changed);
        assert_eq!(engine.position(), (4, 0));
        assert!(engine.command(Command::MoveRight).changed);
        assert!(engine.command(Command::MoveRight).changed);
        assert_eq!(engine.position(), (6, 0));
        assert!(engine.command(Command::MoveDown).changed);
        assert_eq!(engine.position(), (6, 1));
    }

    #[test]
    fn test_soft_drop_at_floor_does_not_lock() {
        let mut engine = squares_only();
        engine.start();
        let piece = engine.piece().unwrap();
        assert!(engine.try_move(piece, 5, 20));

        assert_eq!(engine.command(Command::MoveDown), Outcome::unchanged());
        assert!(engine.piece().is_some());
        assert_eq!(engine.board().get(5, 21), Some(EMPTY));
    }

    #[test]
    fn test_move_up_rotates() {
        let mut engine = TetrisEngine::new(TetrisConfig::default(), SequenceRng::new(vec![3]));
        engine.start();
        // Give the T room to rotate upward.
        assert!(engine.command(Command::MoveDown).changed);
        let before = engine.piece().unwrap();

        assert!(engine.command(Command::MoveUp).changed);
        assert_eq!(engine.piece(), Some(before.rotate_right()));
    }

    #[test]
    fn test_pause_toggle_is_idempotent_in_pairs() {
        let mut engine = squares_only();
        engine.start();

        let paused = engine.command(Command::Pause);
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(paused.tick, Some(TickChange::Stop));

        // Nothing mutates while paused.
        assert_eq!(GameEngine::tick(&mut engine), Outcome::unchanged());
        assert_eq!(engine.command(Command::MoveLeft), Outcome::unchanged());
        assert_eq!(engine.position(), (5, 0));

        let resumed = engine.command(Command::Pause);
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(resumed.tick, Some(TickChange::Start(TETRIS_BASE_FALL_MS)));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = squares_only();
        engine.start();
        engine.board_mut().set(5, 0, 1);
        engine.spawn_piece();
        assert_eq!(engine.status(), Status::GameOver);

        let outcome = engine.command(Command::Restart);
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(outcome.tick, Some(TickChange::Start(TETRIS_BASE_FALL_MS)));
    }

    #[test]
    fn test_preset_dimensions_flow_into_board() {
        let config = TetrisConfig::from_preset(TetrisPreset::Compact);
        let mut engine = TetrisEngine::new(config, SequenceRng::new(vec![4]));
        engine.start();
        assert_eq!((engine.board().width(), engine.board().height()), (8, 16));
        assert_eq!(engine.position(), (4, 0));
    }
}
