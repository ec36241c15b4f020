//! Gravity timer - a cancelable tokio task that enqueues ticks
//!
//! Each arming gets a fresh epoch. The task stamps every tick with the epoch it
//! was armed with, so a tick that was already queued when the timer was
//! cancelled or re-armed can be recognised as stale and dropped by the
//! consumer.

use std::time::Duration;

use tokio::sync::mpsc::{Sender, WeakSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::runtime::EngineEvent;

pub struct GravityTimer {
    tx: WeakSender<EngineEvent>,
    epoch: u64,
    interval_ms: Option<u32>,
    task: Option<JoinHandle<()>>,
}

impl GravityTimer {
    /// The timer only holds a weak sender, so it never keeps the queue open
    pub fn new(tx: &Sender<EngineEvent>) -> Self {
        Self {
            tx: tx.downgrade(),
            epoch: 0,
            interval_ms: None,
            task: None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Period of the running timer
    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a tick stamped with `epoch` came from the running timer
    pub fn is_current(&self, epoch: u64) -> bool {
        self.is_armed() && epoch == self.epoch
    }

    /// (Re)start with a new period; the first tick fires one period from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, interval_ms: u32) {
        self.cancel();

        let epoch = self.epoch;
        let tx = self.tx.clone();
        let period = Duration::from_millis(u64::from(interval_ms.max(1)));

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(tx) = tx.upgrade() else {
                    break;
                };
                if tx.send(EngineEvent::Tick { epoch }).await.is_err() {
                    break;
                }
            }
        }));
        self.interval_ms = Some(interval_ms);
    }

    /// Stop the timer and invalidate every tick it already queued
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.interval_ms = None;
    }
}

impl Drop for GravityTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_once_per_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = GravityTimer::new(&tx);
        timer.arm(100);
        let epoch = timer.epoch();

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(EngineEvent::Tick { epoch: e }) => assert_eq!(e, epoch),
            other => panic!("expected tick, got {other:?}"),
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(matches!(rx.try_recv(), Ok(EngineEvent::Tick { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_bumps_epoch_and_stales_old_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = GravityTimer::new(&tx);
        timer.arm(100);
        let first = timer.epoch();

        tokio::time::sleep(Duration::from_millis(150)).await;
        timer.arm(50);
        assert_ne!(timer.epoch(), first);
        assert_eq!(timer.interval_ms(), Some(50));

        // The tick queued before re-arming is still in the channel but stale.
        match rx.try_recv() {
            Ok(EngineEvent::Tick { epoch }) => assert!(!timer.is_current(epoch)),
            other => panic!("expected tick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = GravityTimer::new(&tx);
        timer.arm(100);
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.interval_ms(), None);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
