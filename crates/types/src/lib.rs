//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the pure engine, the command queue, the keyboard source and the renderer.
//!
//! # Stage Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Numerator of the score-derived gravity interval |
//! | `DROP_INTERVAL_OFFSET_MS` | 200 | Added to every score-derived interval |
//! | `SPEED_STEP_SCORE` | 500 | Score needed for each speed step |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Gravity interval while soft drop is held |
//! | `SOFT_DROP_GRACE_MS` | 150 | Auto-release timeout for terminals without key release |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, STAGE_HEIGHT, STAGE_WIDTH};
//!
//! assert_eq!(PieceKind::from_id(4), Some(PieceKind::O));
//! assert_eq!(PieceKind::O.id(), 4);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(STAGE_WIDTH, 10);
//! assert_eq!(STAGE_HEIGHT, 20);
//! ```

/// Stage width in cells (10 columns)
pub const STAGE_WIDTH: usize = 10;

/// Stage height in cells (20 rows)
pub const STAGE_HEIGHT: usize = 20;

/// Largest tetromino matrix (the I piece is 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Numerator of the score-derived gravity interval
pub const BASE_DROP_MS: u32 = 1000;

/// Constant added to every score-derived gravity interval
pub const DROP_INTERVAL_OFFSET_MS: u32 = 200;

/// Score needed to reach the next speed step
pub const SPEED_STEP_SCORE: u32 = 500;

/// Gravity interval while the soft drop key is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Soft drop auto-release timeout for terminals without key-release events
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Points per cleared row (flat, no multi-line bonus)
pub const LINE_SCORE: u32 = 100;

/// The seven tetromino piece kinds
///
/// The numeric id is stored in every cell the piece occupies; renderers use it
/// to pick a color, the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Nonzero cell id for this kind (I=1 .. Z=7)
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Map a cell id back to its kind. `0` and unknown ids yield `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Occupancy state of a stage cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    /// Overlay of the falling piece; never persisted in the stored stage
    Active,
    /// Baked into the stage by a lock; removed only by a sweep
    Locked,
}

/// A cell on the stage
///
/// `piece == 0` means empty regardless of `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub piece: u8,
    pub status: CellStatus,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        piece: 0,
        status: CellStatus::Empty,
    };

    pub fn active(piece: u8) -> Self {
        Self {
            piece,
            status: CellStatus::Active,
        }
    }

    pub fn locked(piece: u8) -> Self {
        Self {
            piece,
            status: CellStatus::Locked,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.piece == 0
    }

    pub fn is_locked(&self) -> bool {
        self.piece != 0 && self.status == CellStatus::Locked
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Discrete commands delivered by the keyboard source
///
/// Gravity ticks are not commands; the engine injects them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Soft drop key pressed: drop one row now and accelerate gravity
    SoftDropOn,
    /// Soft drop key released: restore the score-derived interval
    SoftDropOff,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop to the lowest reachable row and lock immediately
    HardDrop,
    /// Start (or restart) a session
    Start,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateCW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("softdropoff"), Some(Command::SoftDropOff));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdropon" => Some(Command::SoftDropOn),
            "softdropoff" => Some(Command::SoftDropOff),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "harddrop" => Some(Command::HardDrop),
            "start" => Some(Command::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropOn => "softDropOn",
            Command::SoftDropOff => "softDropOff",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::Start => "start",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_round_trip_and_are_nonzero() {
        for kind in PieceKind::ALL {
            assert_ne!(kind.id(), 0);
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn empty_cell_ignores_status() {
        let cell = Cell {
            piece: 0,
            status: CellStatus::Locked,
        };
        assert!(cell.is_empty());
        assert!(!cell.is_locked());
        assert!(Cell::locked(3).is_locked());
        assert!(!Cell::active(3).is_locked());
    }

    #[test]
    fn command_names_parse_back() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDropOn,
            Command::SoftDropOff,
            Command::RotateCw,
            Command::RotateCcw,
            Command::HardDrop,
            Command::Start,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }
}
