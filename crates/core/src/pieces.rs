//! Pieces module - tetromino shape matrices and the piece catalog
//!
//! Every piece is a small square matrix of cell ids: 0 is transparent and a
//! nonzero value is the piece id of an occupied cell. Only the spawn (0°)
//! orientation is stored; other orientations are produced on demand by
//! [`crate::rotation::rotate`].

use arrayvec::ArrayVec;

use crate::types::{PieceKind, MAX_SHAPE_SIZE};

/// Occupied cells of a shape as `(row, col, id)`, local to the matrix
pub type ShapeCells = ArrayVec<(i32, i32, u8), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Square matrix of cell ids, `size` x `size`, stored in a 4x4 backing array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows. Rows must form a square matrix of at most 4x4.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let shape = Shape::from_rows(&[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]]);
    /// assert_eq!(shape.size(), 3);
    /// assert_eq!(shape.occupied_count(), 4);
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&size),
            "shape must be 1x1 up to {MAX_SHAPE_SIZE}x{MAX_SHAPE_SIZE}, got {size} rows"
        );

        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape rows must form a square matrix");
            cells[r][..size].copy_from_slice(row);
        }

        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell id at local `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> u8 {
        debug_assert!(row < self.size() && col < self.size());
        self.cells[row][col]
    }

    /// Rows of the matrix, top first
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let size = self.size();
        self.cells[..size].iter().map(move |row| &row[..size])
    }

    /// Occupied cells as `(row, col, id)`
    pub fn occupied(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for (r, row) in self.rows().enumerate() {
            for (c, &id) in row.iter().enumerate() {
                if id != 0 {
                    out.push((r as i32, c as i32, id));
                }
            }
        }
        out
    }

    pub fn occupied_count(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&id| id != 0).count())
            .sum()
    }

    /// Piece id carried by the occupied cells (0 for an empty matrix)
    pub fn piece_id(&self) -> u8 {
        self.rows()
            .flat_map(|row| row.iter().copied())
            .find(|&id| id != 0)
            .unwrap_or(0)
    }

    /// Mirror across the main diagonal
    pub fn transposed(&self) -> Self {
        let mut out = *self;
        for r in 0..self.size() {
            for c in 0..self.size() {
                out.cells[r][c] = self.cells[c][r];
            }
        }
        out
    }

    /// Reverse the cells of each row (horizontal mirror)
    pub fn with_rows_mirrored(&self) -> Self {
        let mut out = *self;
        let size = self.size();
        for row in out.cells[..size].iter_mut() {
            row[..size].reverse();
        }
        out
    }

    /// Reverse the order of the rows (vertical mirror)
    pub fn with_row_order_reversed(&self) -> Self {
        let mut out = *self;
        out.cells[..self.size()].reverse();
        out
    }
}

/// Get the spawn orientation of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    let k = kind.id();
    match kind {
        PieceKind::I => Shape::from_rows(&[
            &[0, k, 0, 0],
            &[0, k, 0, 0],
            &[0, k, 0, 0],
            &[0, k, 0, 0],
        ]),
        PieceKind::J => Shape::from_rows(&[&[0, k, 0], &[0, k, 0], &[k, k, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, k, 0], &[0, k, 0], &[0, k, k]]),
        PieceKind::O => Shape::from_rows(&[&[k, k], &[k, k]]),
        PieceKind::S => Shape::from_rows(&[&[0, k, k], &[k, k, 0], &[0, 0, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 0, 0], &[k, k, k], &[0, k, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[k, k, 0], &[0, k, k], &[0, 0, 0]]),
    }
}

/// Row every new piece spawns on
pub const SPAWN_ROW: i32 = 0;

/// Column that centres `shape` horizontally on a stage of `stage_width`
pub fn spawn_column(shape: &Shape, stage_width: usize) -> i32 {
    (stage_width as i32 - shape.size() as i32) / 2
}
