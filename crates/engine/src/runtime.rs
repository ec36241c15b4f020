//! Engine runtime - the single consumer of the command queue
//!
//! Player commands and gravity ticks are serialized through one bounded
//! channel and applied one at a time to the owned [`GameState`]. After every
//! event that changed the session the engine:
//!
//! 1. logs the lock event, if any
//! 2. re-arms, keeps, or cancels the gravity timer to match the phase and the
//!    current drop interval
//! 3. publishes a snapshot to the [`RenderSink`]

use anyhow::{Context, Result};
use log::{debug, info, trace};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_core::{GameSnapshot, GameState, LockEvent, PieceSource};
use blockfall_types::{Command, Phase};

use crate::config::EngineConfig;
use crate::gravity::GravityTimer;
use crate::sink::RenderSink;

/// Event delivered to the engine loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Command(Command),
    /// Gravity tick stamped with the timer epoch that produced it
    Tick {
        epoch: u64,
    },
    Shutdown,
}

/// Cloneable producer side of the command queue
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    pub async fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(EngineEvent::Command(command))
            .await
            .context("engine has stopped")
    }

    /// Blocking variant for input threads outside the async runtime
    pub fn blocking_send(&self, command: Command) -> Result<()> {
        self.tx
            .blocking_send(EngineEvent::Command(command))
            .context("engine has stopped")
    }

    /// Ask the engine to stop after the events already queued
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(EngineEvent::Shutdown)
            .await
            .context("engine has stopped")
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns the session, the gravity timer and the render sink
pub struct Engine<P, S> {
    state: GameState<P>,
    sink: S,
    rx: mpsc::Receiver<EngineEvent>,
    timer: GravityTimer,
    frame: GameSnapshot,
}

impl<P, S> Engine<P, S>
where
    P: PieceSource,
    S: RenderSink,
{
    pub fn new(state: GameState<P>, sink: S, queue_depth: usize) -> (Self, EngineHandle) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let timer = GravityTimer::new(&tx);
        let engine = Self {
            state,
            sink,
            rx,
            timer,
            frame: GameSnapshot::default(),
        };
        (engine, EngineHandle { tx })
    }

    pub fn state(&self) -> &GameState<P> {
        &self.state
    }

    /// Process events until shutdown or until every handle is dropped
    ///
    /// Returns the final snapshot. A failing sink aborts the loop.
    pub async fn run(mut self) -> Result<GameSnapshot> {
        self.publish()?;

        while let Some(event) = self.rx.recv().await {
            match event {
                EngineEvent::Command(command) => self.apply_command(command)?,
                EngineEvent::Tick { epoch } => self.apply_tick(epoch)?,
                EngineEvent::Shutdown => {
                    debug!("engine shutdown requested");
                    break;
                }
            }
        }

        self.timer.cancel();
        Ok(self.state.snapshot())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        if !self.state.handle_command(command) {
            trace!("command {} had no effect", command.as_str());
            return Ok(());
        }

        let restarted = command == Command::Start;
        if restarted {
            info!("game started");
        }
        self.after_change(restarted)
    }

    fn apply_tick(&mut self, epoch: u64) -> Result<()> {
        if !self.timer.is_current(epoch) {
            trace!(
                "discarding stale tick (epoch {epoch}, current {})",
                self.timer.epoch()
            );
            return Ok(());
        }

        if !self.state.tick() {
            return Ok(());
        }
        self.after_change(false)
    }

    fn after_change(&mut self, restarted: bool) -> Result<()> {
        if let Some(event) = self.state.take_last_event() {
            self.log_lock(&event);
        } else if restarted && self.state.phase() == Phase::GameOver {
            info!("game over: first piece could not spawn");
        }
        self.sync_timer(restarted);
        self.publish()
    }

    fn log_lock(&self, event: &LockEvent) {
        debug!(
            "piece locked: {} line(s) cleared {:?}, +{} points",
            event.lines_cleared, event.cleared_rows, event.score_delta
        );
        if event.game_over {
            info!(
                "game over: score {} lines {}",
                self.state.score(),
                self.state.lines_cleared()
            );
        }
    }

    fn sync_timer(&mut self, force: bool) {
        match self.state.phase() {
            Phase::Running => {
                let interval = self.state.drop_interval_ms();
                if force || self.timer.interval_ms() != Some(interval) {
                    debug!("gravity armed at {interval}ms");
                    self.timer.arm(interval);
                }
            }
            Phase::Idle | Phase::GameOver => {
                if self.timer.is_armed() {
                    debug!("gravity stopped ({})", self.state.phase().as_str());
                    self.timer.cancel();
                }
            }
        }
    }

    fn publish(&mut self) -> Result<()> {
        self.state.snapshot_into(&mut self.frame);
        self.sink
            .render(&self.frame)
            .context("render sink failed")
    }
}

/// Spawn an engine task with a piece source taken from `config`
pub fn spawn_engine<S>(
    config: &EngineConfig,
    sink: S,
) -> (EngineHandle, JoinHandle<Result<GameSnapshot>>)
where
    S: RenderSink + 'static,
{
    spawn_engine_with(GameState::with_pieces(config.piece_source()), sink, config)
}

/// Spawn an engine task around a prepared session
pub fn spawn_engine_with<P, S>(
    state: GameState<P>,
    sink: S,
    config: &EngineConfig,
) -> (EngineHandle, JoinHandle<Result<GameSnapshot>>)
where
    P: PieceSource + Send + 'static,
    S: RenderSink + 'static,
{
    let (engine, handle) = Engine::new(state, sink, config.queue_depth);
    (handle, tokio::spawn(engine.run()))
}
