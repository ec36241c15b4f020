//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to the command it triggers.
///
/// The soft drop keys map to [`Command::SoftDropOn`]; releasing them is
/// handled by [`crate::InputHandler`].
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MoveRight)
        }
        code if is_soft_drop_key(code) => Some(Command::SoftDropOn),

        // Rotation
        KeyCode::Up | KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Command::RotateCw)
        }

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Start),

        _ => None,
    }
}

/// Keys that hold the soft drop while pressed.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Char('a')), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Char('L')), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Char('d')), Some(Command::MoveRight));
    }

    #[test]
    fn test_soft_drop_keys() {
        for code in [KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('S')] {
            assert!(is_soft_drop_key(code));
            assert_eq!(press(code), Some(Command::SoftDropOn));
        }
        assert!(!is_soft_drop_key(KeyCode::Up));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(Command::RotateCcw));
        assert_eq!(press(KeyCode::Char('z')), Some(Command::RotateCcw));
        assert_eq!(press(KeyCode::Char('x')), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('K')), Some(Command::RotateCw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(press(KeyCode::Enter), Some(Command::Start));
        assert_eq!(press(KeyCode::Char('r')), Some(Command::Start));
        assert_eq!(press(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_control_chords_are_not_commands() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
