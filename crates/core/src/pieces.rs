//! Pieces module - tetromino catalog and rotation
//!
//! Each shape is four cell offsets around a pivot. Offsets use screen
//! orientation: x grows to the right, y grows downward. There are no wall
//! kicks; a rotation either fits where it is or is rejected.

use crate::types::ShapeId;

/// Offset of a single cell relative to the piece pivot
pub type CellOffset = (i8, i8);

/// Four cell offsets from the piece pivot
pub type PieceShape = [CellOffset; 4];

/// Spawn orientation offsets for a shape
pub fn shape_offsets(shape: ShapeId) -> PieceShape {
    match shape {
        ShapeId::Z => [(0, -1), (0, 0), (-1, 0), (-1, 1)],
        ShapeId::S => [(0, -1), (0, 0), (1, 0), (1, 1)],
        ShapeId::Line => [(0, -1), (0, 0), (0, 1), (0, 2)],
        ShapeId::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        ShapeId::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
        ShapeId::L => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        ShapeId::MirroredL => [(1, -1), (0, -1), (0, 0), (0, 1)],
    }
}

/// Map a uniform draw in `0..7` onto a shape
pub fn shape_from_index(index: u32) -> ShapeId {
    ShapeId::ALL[(index as usize) % ShapeId::ALL.len()]
}

/// A tetromino: shape id plus its current (possibly rotated) offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: ShapeId,
    offsets: PieceShape,
}

impl Piece {
    /// Create a piece in its spawn orientation
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            offsets: shape_offsets(shape),
        }
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn offsets(&self) -> &PieceShape {
        &self.offsets
    }

    /// Quarter turn clockwise: every `(x, y)` becomes `(-y, x)`.
    ///
    /// The square is a fixed point and comes back unchanged.
    pub fn rotate_right(&self) -> Piece {
        if self.shape == ShapeId::Square {
            return *self;
        }

        let mut offsets = self.offsets;
        for cell in offsets.iter_mut() {
            *cell = (-cell.1, cell.0);
        }
        Piece {
            shape: self.shape,
            offsets,
        }
    }

    pub fn min_x(&self) -> i8 {
        self.offsets.iter().map(|&(x, _)| x).min().unwrap_or(0)
    }

    pub fn max_x(&self) -> i8 {
        self.offsets.iter().map(|&(x, _)| x).max().unwrap_or(0)
    }

    pub fn min_y(&self) -> i8 {
        self.offsets.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }

    pub fn max_y(&self) -> i8 {
        self.offsets.iter().map(|&(_, y)| y).max().unwrap_or(0)
    }

    /// Absolute board cells when the pivot sits at `(x, y)`
    pub fn cells_at(&self, x: i16, y: i16) -> [(i16, i16); 4] {
        let mut out = [(0i16, 0i16); 4];
        for (slot, &(dx, dy)) in out.iter_mut().zip(self.offsets.iter()) {
            *slot = (x + dx as i16, y + dy as i16);
        }
        out
    }
}
