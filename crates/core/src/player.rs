//! The active (falling) piece

use arrayvec::ArrayVec;

use crate::pieces::{get_shape, spawn_column, Shape, SPAWN_ROW};
use crate::types::{PieceKind, MAX_SHAPE_SIZE};

/// Offset applied to a piece position, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Delta {
    pub col: i32,
    pub row: i32,
}

impl Delta {
    pub const NONE: Delta = Delta { col: 0, row: 0 };
    pub const LEFT: Delta = Delta { col: -1, row: 0 };
    pub const RIGHT: Delta = Delta { col: 1, row: 0 };
    pub const DOWN: Delta = Delta { col: 0, row: 1 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub const fn down(rows: i32) -> Self {
        Self { col: 0, row: rows }
    }
}

/// Active falling piece
///
/// `col`/`row` locate the top-left corner of the shape matrix on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub col: i32,
    pub row: i32,
    pub shape: Shape,
    /// Set when the last downward attempt failed and the piece must lock
    pub collided: bool,
}

impl Player {
    pub fn new(shape: Shape, col: i32, row: i32) -> Self {
        Self {
            col,
            row,
            shape,
            collided: false,
        }
    }

    /// Create a piece horizontally centred on the top row
    pub fn spawn(kind: PieceKind, stage_width: usize) -> Self {
        let shape = get_shape(kind);
        let col = spawn_column(&shape, stage_width);
        Self::new(shape, col, SPAWN_ROW)
    }

    /// Copy moved by `delta`
    pub fn moved(&self, delta: Delta) -> Self {
        Self {
            col: self.col + delta.col,
            row: self.row + delta.row,
            ..*self
        }
    }

    /// Occupied cells in stage coordinates as `(col, row, id)`
    pub fn cells(&self) -> ArrayVec<(i32, i32, u8), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> {
        self.shape
            .occupied()
            .into_iter()
            .map(|(r, c, id)| (self.col + c, self.row + r, id))
            .collect()
    }

    pub fn piece_id(&self) -> u8 {
        self.shape.piece_id()
    }

    pub fn kind(&self) -> Option<PieceKind> {
        PieceKind::from_id(self.piece_id())
    }
}
