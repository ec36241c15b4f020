//! Soft drop latch for terminal environments.
//!
//! Soft drop is a held key: press turns it on, release turns it off. Many
//! terminals never report key releases, so the handler releases the soft drop
//! on its own once no press or repeat arrived for the grace timeout. As soon as
//! a real release event is seen the timeout is no longer used.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{Command, SOFT_DROP_GRACE_MS};

/// Turns raw key events into commands, including soft drop release.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    last_soft_drop: Option<Instant>,
    release_timeout: Duration,
    /// Set once the terminal reported a key release
    release_events: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_release_timeout(Duration::from_millis(SOFT_DROP_GRACE_MS as u64))
    }

    pub fn with_release_timeout(release_timeout: Duration) -> Self {
        Self {
            soft_drop_held: false,
            last_soft_drop: None,
            release_timeout,
            release_events: false,
        }
    }

    /// Handle one key event received at `now`.
    ///
    /// Every press (and key repeat) of a soft drop key yields
    /// [`Command::SoftDropOn`], which the engine turns into one drop step.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<Command> {
        match key.kind {
            KeyEventKind::Release => {
                self.release_events = true;
                if is_soft_drop_key(key.code) {
                    self.release_soft_drop()
                } else {
                    None
                }
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let command = handle_key_event(key)?;
                if command == Command::SoftDropOn {
                    self.soft_drop_held = true;
                    self.last_soft_drop = Some(now);
                }
                Some(command)
            }
        }
    }

    /// Auto-release the soft drop when the terminal went quiet.
    pub fn poll(&mut self, now: Instant) -> Option<Command> {
        if self.release_events || !self.soft_drop_held {
            return None;
        }
        let last = self.last_soft_drop?;
        if now.saturating_duration_since(last) > self.release_timeout {
            self.release_soft_drop()
        } else {
            None
        }
    }

    fn release_soft_drop(&mut self) -> Option<Command> {
        self.last_soft_drop = None;
        if std::mem::take(&mut self.soft_drop_held) {
            Some(Command::SoftDropOff)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_and_release_soft_drop() {
        let mut handler = InputHandler::new();
        let t0 = Instant::now();

        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyEventKind::Press), t0),
            Some(Command::SoftDropOn)
        );
        assert!(handler.soft_drop_held);
        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyEventKind::Release), t0),
            Some(Command::SoftDropOff)
        );
        assert!(!handler.soft_drop_held);
        assert_eq!(
            handler.handle_key(key(KeyCode::Down, KeyEventKind::Release), t0),
            None
        );
    }

    #[test]
    fn test_repeats_keep_soft_drop_alive() {
        let mut handler = InputHandler::with_release_timeout(Duration::from_millis(150));
        let t0 = Instant::now();
        handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), t0);

        let t1 = t0 + Duration::from_millis(100);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('s'), KeyEventKind::Repeat), t1),
            Some(Command::SoftDropOn)
        );
        assert_eq!(handler.poll(t0 + Duration::from_millis(200)), None);
        assert_eq!(
            handler.poll(t0 + Duration::from_millis(251)),
            Some(Command::SoftDropOff)
        );
        assert_eq!(handler.poll(t0 + Duration::from_millis(400)), None);
    }

    #[test]
    fn test_no_auto_release_once_terminal_reports_releases() {
        let mut handler = InputHandler::new();
        let t0 = Instant::now();
        handler.handle_key(key(KeyCode::Left, KeyEventKind::Release), t0);
        handler.handle_key(key(KeyCode::Down, KeyEventKind::Press), t0);

        assert_eq!(handler.poll(t0 + Duration::from_secs(5)), None);
        assert!(handler.soft_drop_held);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut handler = InputHandler::new();
        let t0 = Instant::now();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), t0),
            Some(Command::HardDrop)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' '), KeyEventKind::Release), t0),
            None
        );
        assert!(!handler.soft_drop_held);
    }
}
