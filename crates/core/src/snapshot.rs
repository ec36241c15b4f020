//! Snapshots handed to render sinks.

use crate::stage::Stage;
use crate::types::Phase;

/// Read-only view of a session, produced after every committed command
///
/// `grid` is the locked stage with the falling piece overlaid as active cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: Stage,
    pub score: u32,
    pub lines_cleared: u32,
    pub phase: Phase,
    pub drop_interval_ms: u32,
    pub soft_dropping: bool,
    pub pieces_spawned: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Stage::default(),
            score: 0,
            lines_cleared: 0,
            phase: Phase::Idle,
            drop_interval_ms: 0,
            soft_dropping: false,
            pieces_spawned: 0,
        }
    }
}
