//! Game state module - the session state machine
//!
//! Ties together the stage, the active piece, the piece source and the speed
//! policy. Every public operation is synchronous and either commits a new
//! (stage, player) pair or leaves the state untouched:
//!
//! ```text
//! Idle --start--> Running --(tick | softDropOn | hardDrop)--> Running
//!                    |                                          |
//!                    +---- lock at top / spawn collides ----> GameOver --start--> Running
//! ```
//!
//! Timing is not handled here. The caller (the engine's command queue) decides
//! when a gravity [`GameState::tick`] happens, using
//! [`GameState::drop_interval_ms`] as the period.

use crate::collision::{collides, drop_distance};
use crate::pieces::SPAWN_ROW;
use crate::player::{Delta, Player};
use crate::rng::{PieceSource, UniformPieces};
use crate::rotation::attempt_rotate;
use crate::scoring::{calculate_line_score, get_drop_interval_ms, get_soft_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::stage::Stage;
use crate::types::{Command, Direction, Phase, STAGE_HEIGHT, STAGE_WIDTH};

/// Emitted every time a piece locks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Removed row indices in the post-lock, pre-sweep stage
    pub cleared_rows: Vec<usize>,
    pub score_delta: u32,
    /// The lock ended the session
    pub game_over: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<P = UniformPieces> {
    /// Locked cells only; the active piece is overlaid on snapshots
    stage: Stage,
    active: Option<Player>,
    pieces: P,
    score: u32,
    lines_cleared: u32,
    drop_interval_ms: u32,
    soft_dropping: bool,
    phase: Phase,
    /// Monotonic count of spawned pieces, reset on start
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameState<UniformPieces> {
    /// Create an idle session with a seeded uniform piece source
    pub fn new(seed: u64) -> Self {
        Self::with_pieces(UniformPieces::seeded(seed))
    }
}

impl<P: PieceSource> GameState<P> {
    /// Create an idle session on a 10x20 stage
    pub fn with_pieces(pieces: P) -> Self {
        Self::with_stage_size(STAGE_WIDTH, STAGE_HEIGHT, pieces)
    }

    /// Create an idle session on a custom-sized stage
    pub fn with_stage_size(width: usize, height: usize, pieces: P) -> Self {
        Self {
            stage: Stage::new(width, height),
            active: None,
            pieces,
            score: 0,
            lines_cleared: 0,
            drop_interval_ms: get_drop_interval_ms(0),
            soft_dropping: false,
            phase: Phase::Idle,
            pieces_spawned: 0,
            last_event: None,
        }
    }

    /// Start (or restart) on an empty stage
    pub fn start(&mut self) {
        let empty = Stage::new(self.stage.width(), self.stage.height());
        self.start_with_stage(empty);
    }

    /// Start (or restart) on a prepared stage of locked cells
    ///
    /// Goes straight to [`Phase::GameOver`] when the first piece cannot spawn.
    pub fn start_with_stage(&mut self, stage: Stage) {
        debug_assert!(
            stage.cells().iter().all(|c| c.is_empty() || c.is_locked()),
            "prepared stage may only hold locked cells"
        );
        self.stage = stage;
        self.active = None;
        self.score = 0;
        self.lines_cleared = 0;
        self.soft_dropping = false;
        self.drop_interval_ms = get_drop_interval_ms(0);
        self.pieces_spawned = 0;
        self.last_event = None;
        self.phase = Phase::Running;
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Current gravity period (soft drop included)
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn active(&self) -> Option<Player> {
        self.active
    }

    /// The locked-only stage
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Apply a player command
    ///
    /// Returns whether the state changed. Rejected moves and rotations, and
    /// anything but `Start` outside [`Phase::Running`], are silent no-ops.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if command == Command::Start {
            self.start();
            return true;
        }
        if self.phase != Phase::Running {
            return false;
        }

        let changed = match command {
            Command::MoveLeft => self.try_move(Delta::LEFT),
            Command::MoveRight => self.try_move(Delta::RIGHT),
            Command::SoftDropOn => {
                self.soft_dropping = true;
                self.drop_interval_ms = get_soft_drop_interval_ms();
                self.step_down();
                true
            }
            Command::SoftDropOff => {
                if self.soft_dropping {
                    self.soft_dropping = false;
                    self.drop_interval_ms = get_drop_interval_ms(self.score);
                    true
                } else {
                    false
                }
            }
            Command::RotateCw => self.try_rotate(Direction::Clockwise),
            Command::RotateCcw => self.try_rotate(Direction::CounterClockwise),
            Command::HardDrop => self.hard_drop(),
            Command::Start => unreachable!("handled above"),
        };

        self.debug_check_placement();
        changed
    }

    /// Gravity tick: move the piece down one row, or lock it
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let changed = self.step_down();
        self.debug_check_placement();
        changed
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.stage.overlay_into(self.active.as_ref(), &mut out.grid);
        out.score = self.score;
        out.lines_cleared = self.lines_cleared;
        out.phase = self.phase;
        out.drop_interval_ms = self.drop_interval_ms;
        out.soft_dropping = self.soft_dropping;
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn try_move(&mut self, delta: Delta) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if collides(&active, &self.stage, delta) {
            return false;
        }
        self.active = Some(active.moved(delta));
        true
    }

    fn try_rotate(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = attempt_rotate(&active, &self.stage, direction);
        if rotated == active {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !collides(&active, &self.stage, Delta::DOWN) {
            self.active = Some(active.moved(Delta::DOWN));
            return true;
        }

        self.lock_piece(Player {
            collided: true,
            ..active
        });
        true
    }

    /// Fall to the first obstruction and lock, in one step
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let distance = drop_distance(&active, &self.stage);
        let mut landed = active.moved(Delta::down(distance));
        landed.collided = true;
        self.lock_piece(landed);
        true
    }

    /// Bake the piece into the stage, sweep, score, then respawn or end
    fn lock_piece(&mut self, player: Player) {
        debug_assert!(player.collided);

        let (stage, sweep) = self.stage.lock(&player).sweep();
        self.stage = stage;
        self.active = None;

        let lines = sweep.lines_cleared();
        let score_delta = calculate_line_score(lines);
        self.score = self.score.saturating_add(score_delta);
        self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);
        if !self.soft_dropping {
            self.drop_interval_ms = get_drop_interval_ms(self.score);
        }

        // A piece that locks without ever leaving the spawn row tops out.
        let game_over = if player.row <= SPAWN_ROW {
            self.phase = Phase::GameOver;
            true
        } else {
            !self.spawn_piece()
        };

        self.last_event = Some(LockEvent {
            lines_cleared: lines as u32,
            cleared_rows: sweep.cleared_rows,
            score_delta,
            game_over,
        });
    }

    /// Draw the next piece and place it centred on the top row
    ///
    /// Returns false (and ends the session) when the spawn position collides.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.pieces.next_piece();
        let player = Player::spawn(kind, self.stage.width());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if collides(&player, &self.stage, Delta::NONE) {
            self.phase = Phase::GameOver;
            self.active = None;
            return false;
        }

        self.active = Some(player);
        true
    }

    fn debug_check_placement(&self) {
        debug_assert!(
            self.active
                .map_or(true, |p| !collides(&p, &self.stage, Delta::NONE)),
            "active piece overlaps the stage"
        );
    }
}

impl Default for GameState<UniformPieces> {
    fn default() -> Self {
        Self::new(1)
    }
}
