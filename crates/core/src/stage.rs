//! Stage module - the grid of locked cells
//!
//! The stage is a `width` x `height` grid (10x20 by default) stored as a flat,
//! row-major vector. Coordinates are `(col, row)` with `row` 0 at the top.
//!
//! The stored stage only ever holds locked cells. The falling piece is drawn on
//! a copy via [`Stage::overlay`]; [`Stage::lock`] and [`Stage::sweep`] are the
//! only persistent transforms. Every transform returns a new stage.

use crate::player::Player;
use crate::types::{Cell, STAGE_HEIGHT, STAGE_WIDTH};

/// The game stage using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stage {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

/// Outcome of a sweep: which rows were complete and removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepResult {
    /// Indices (in the pre-sweep stage) of removed rows, top to bottom
    pub cleared_rows: Vec<usize>,
}

impl SweepResult {
    pub fn lines_cleared(&self) -> usize {
        self.cleared_rows.len()
    }
}

impl Stage {
    /// Create an all-empty stage
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "stage must have at least one cell");
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some((row as usize) * self.width + (col as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at `(col, row)`, `None` when out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at `(col, row)`. Returns false if out of bounds.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_in_bounds(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    /// Whether `(col, row)` holds a locked cell
    pub fn is_locked(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(cell) if cell.is_locked())
    }

    /// Row slice, top row first
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A row is complete when every cell carries a piece id
    pub fn is_row_complete(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.row(row).iter().all(|cell| !cell.is_empty())
    }

    /// Copy of this stage with the player's occupied cells marked active
    ///
    /// Cells that fall outside the grid (e.g. negative rows) are skipped.
    pub fn overlay(&self, player: &Player) -> Stage {
        let mut out = self.clone();
        for (col, row, id) in player.cells() {
            out.set(col, row, Cell::active(id));
        }
        out
    }

    /// Like [`Stage::overlay`], but writes into `out` and reuses its allocation
    pub fn overlay_into(&self, player: Option<&Player>, out: &mut Stage) {
        out.width = self.width;
        out.height = self.height;
        out.cells.clone_from(&self.cells);
        if let Some(player) = player {
            for (col, row, id) in player.cells() {
                out.set(col, row, Cell::active(id));
            }
        }
    }

    /// Copy of this stage with the player's occupied cells locked in
    ///
    /// Only valid for a non-colliding placement; anything else is a bug.
    pub fn lock(&self, player: &Player) -> Stage {
        let mut out = self.clone();
        for (col, row, id) in player.cells() {
            let idx = self
                .index(col, row)
                .unwrap_or_else(|| panic!("lock target ({col}, {row}) is outside the stage"));
            assert!(
                self.cells[idx].is_empty(),
                "lock target ({col}, {row}) is already occupied"
            );
            out.cells[idx] = Cell::locked(id);
        }
        out
    }

    /// Remove every complete row and prepend as many empty rows
    ///
    /// The relative order of the surviving rows is preserved and the total row
    /// count never changes.
    pub fn sweep(&self) -> (Stage, SweepResult) {
        let cleared_rows: Vec<usize> = (0..self.height)
            .filter(|&row| self.is_row_complete(row))
            .collect();

        if cleared_rows.is_empty() {
            return (self.clone(), SweepResult::default());
        }

        let mut cells = Vec::with_capacity(self.cells.len());
        cells.resize(cleared_rows.len() * self.width, Cell::EMPTY);
        for (row, slice) in self.rows().enumerate() {
            if !cleared_rows.contains(&row) {
                cells.extend_from_slice(slice);
            }
        }

        let swept = Stage {
            width: self.width,
            height: self.height,
            cells,
        };
        (swept, SweepResult { cleared_rows })
    }

    /// Build a stage from a picture, one string per row (tests and benches)
    ///
    /// `.` is empty, `#` is a locked cell of id 8 (not a catalog piece) and the
    /// digits `1`-`7` are locked cells with that piece id.
    pub fn from_picture(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut stage = Stage::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), width, "ragged stage picture");
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::EMPTY,
                    '#' => Cell::locked(8),
                    d if d.is_ascii_digit() && d != '0' => Cell::locked(d as u8 - b'0'),
                    other => panic!("unexpected stage picture char {other:?}"),
                };
                stage.set(col as i32, row as i32, cell);
            }
        }
        stage
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(STAGE_WIDTH, STAGE_HEIGHT)
    }
}
