//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and no I/O. Timing lives in
//! `blockfall-engine`, drawing in `blockfall-term`.
//!
//! # Module Structure
//!
//! - [`stage`]: width x height grid of locked cells, overlay/lock/sweep
//! - [`pieces`]: the seven-piece catalog and the square shape matrix
//! - [`player`]: the active piece and position deltas
//! - [`collision`]: the single legality predicate used by every move
//! - [`rotation`]: matrix rotation with the alternating wall-kick search
//! - [`scoring`]: flat line scoring and the score-derived drop interval
//! - [`rng`]: injectable piece sources (seeded uniform, scripted)
//! - [`game_state`]: the Idle/Running/GameOver session state machine
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - Pieces are chosen uniformly and independently (no bag, no preview, no hold)
//! - Rotation transposes the matrix and mirrors it; a blocked rotation tries
//!   sideways steps +1, -2, +3, -4, ..., each applied to the previous
//!   candidate, while the step stays within the shape width
//! - Every cleared row is worth 100 points
//! - Gravity starts at 1200ms and speeds up every 500 points
//! - A piece that locks on the spawn row, or a spawn that collides, ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.handle_command(Command::MoveRight);
//! game.handle_command(Command::RotateCw);
//! game.handle_command(Command::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;
pub mod stage;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{collides, drop_distance};
pub use game_state::{GameState, LockEvent};
pub use pieces::{get_shape, spawn_column, Shape, SPAWN_ROW};
pub use player::{Delta, Player};
pub use rng::{PieceSource, ScriptedPieces, UniformPieces};
pub use rotation::{attempt_rotate, rotate};
pub use scoring::{calculate_line_score, get_drop_interval_ms, get_soft_drop_interval_ms};
pub use snapshot::GameSnapshot;
pub use stage::{Stage, SweepResult};
