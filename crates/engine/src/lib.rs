//! Serialized command queue and cancelable gravity scheduler
//!
//! The engine task is the only place the session is mutated. Keyboard input
//! (through an [`EngineHandle`]) and the [`GravityTimer`] both enqueue
//! [`EngineEvent`]s on one bounded channel, so a tick and a keypress can never
//! interleave inside a command.
//!
//! ```no_run
//! use blockfall_engine::{spawn_engine, EngineConfig, NullSink};
//! use blockfall_types::Command;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env();
//! let (handle, task) = spawn_engine(&config, NullSink);
//! handle.send(Command::Start).await?;
//! handle.shutdown().await?;
//! let last = task.await??;
//! println!("final score {}", last.score);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod gravity;
pub mod runtime;
pub mod sink;

pub use config::EngineConfig;
pub use gravity::GravityTimer;
pub use runtime::{spawn_engine, spawn_engine_with, Engine, EngineEvent, EngineHandle};
pub use sink::{ChannelSink, NullSink, RenderSink};
