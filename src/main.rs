//! Terminal Blockfall runner (default binary).
//!
//! The engine task owns the session and draws through a [`TerminalSink`].
//! Keyboard input is read on a blocking thread and forwarded to the engine's
//! command queue.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use blockfall::engine::{spawn_engine, EngineConfig, EngineHandle};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{leave_terminal, TerminalRenderer};
use blockfall::{logger_builder, TerminalSink};

/// How often the input thread wakes up to check soft drop release and shutdown.
const INPUT_POLL: Duration = Duration::from_millis(25);

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    logger_builder(config.log_path.as_deref())?.init();

    info!(
        "starting (seed {:?}, queue depth {}, soft drop grace {}ms)",
        config.seed, config.queue_depth, config.soft_drop_grace_ms
    );

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;

    // Always try to restore terminal state, even on panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_terminal();
        default_hook(panic_info);
    }));

    let (handle, engine_task) = spawn_engine(&config, TerminalSink::new(renderer));

    let input_task = tokio::task::spawn_blocking({
        let handle = handle.clone();
        let grace = config.soft_drop_grace();
        move || read_input(&handle, grace)
    });
    let input_result = input_task.await.context("input thread panicked")?;

    if handle.shutdown().await.is_err() {
        warn!("engine stopped before shutdown was requested");
    }
    let engine_result = engine_task.await.context("engine task panicked")?;

    leave_terminal()?;

    let last = engine_result?;
    input_result?;
    println!("score {}  lines {}", last.score, last.lines_cleared);
    Ok(())
}

/// Forward key presses to the engine until the player quits or the engine stops.
fn read_input(handle: &EngineHandle, grace: Duration) -> Result<()> {
    let mut input = InputHandler::with_release_timeout(grace);

    while !handle.is_closed() {
        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = input.handle_key(key, Instant::now()) {
                    handle.blocking_send(command)?;
                }
            }
        }

        if let Some(command) = input.poll(Instant::now()) {
            handle.blocking_send(command)?;
        }
    }

    Ok(())
}
