//! Render sinks: where the engine publishes a snapshot after every committed event

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;

use blockfall_core::GameSnapshot;

/// Consumer of engine snapshots
///
/// Called on the engine task after every command or tick that changed the
/// session. An error stops the engine.
pub trait RenderSink: Send {
    fn render(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

impl<F> RenderSink for F
where
    F: FnMut(&GameSnapshot) -> Result<()> + Send,
{
    fn render(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self(snapshot)
    }
}

/// Forwards owned snapshots over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<GameSnapshot>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RenderSink for ChannelSink {
    fn render(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.tx
            .send(snapshot.clone())
            .map_err(|_| anyhow!("snapshot receiver dropped"))
    }
}

/// Discards every snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _snapshot: &GameSnapshot) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut frames = 0;
        {
            let mut sink = |_: &GameSnapshot| -> Result<()> {
                frames += 1;
                Ok(())
            };
            sink.render(&GameSnapshot::default()).unwrap();
            sink.render(&GameSnapshot::default()).unwrap();
        }
        assert_eq!(frames, 2);
    }

    #[test]
    fn test_channel_sink_forwards_and_reports_closed_receiver() {
        let (mut sink, mut rx) = ChannelSink::new();
        let snapshot = GameSnapshot {
            score: 300,
            ..GameSnapshot::default()
        };
        sink.render(&snapshot).unwrap();
        assert_eq!(rx.try_recv().unwrap().score, 300);

        drop(rx);
        assert!(sink.render(&snapshot).is_err());
    }
}
