//! Board module - the Tetris settled-cell grid
//!
//! The board is `width x height` cells, each empty (0) or holding the color id
//! of the shape that settled there. Dimensions are fixed when the board is
//! built and never change afterwards.
//! Uses a flat row-major array for cache locality.
//! Coordinates: (x, y) where x grows to the right and y grows downward.

use crate::types::{Cell, EMPTY};

/// Settled cells of a Tetris game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![EMPTY; len],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_free(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// A row is full when none of its cells is empty
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove row `y`: every row above it moves down by one and the top row
    /// becomes empty.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }

        let width = self.width as usize;

        // Copy downward starting from the removed row so nothing is overwritten
        // before it has been moved.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(EMPTY);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Full rows are identified in one top-to-bottom scan first. Removing them in
    /// that order keeps the remaining indices valid: a removal only shifts rows
    /// strictly above it, and those have already been handled.
    pub fn remove_full_rows(&mut self) -> usize {
        let rows = self.full_rows();
        for &y in &rows {
            self.remove_row(y);
        }
        rows.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from rows of cells (rows must share one width)
    pub fn from_rows(rows: &[Vec<Cell>]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u8;
        let mut board = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate().take(width as usize) {
                board.set(x as i16, y as i16, cell);
            }
        }
        board
    }

    /// Convert to rows of cells
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height as usize)
            .map(|y| self.row(y).to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::TETRIS_BOARD_WIDTH, crate::types::TETRIS_BOARD_HEIGHT)
    }
}
