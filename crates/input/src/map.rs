//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Intent bound to a key code, ignoring modifiers.
///
/// Arrow keys are the primary bindings; vim (hjkl) and WASD letters are
/// aliases.
pub fn intent_for_code(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Intent::Left),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Intent::Right),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Intent::SoftDrop),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => Some(Intent::RotateCw),
        KeyCode::Char(' ') => Some(Intent::HardDrop),
        KeyCode::Char('p' | 'P') => Some(Intent::TogglePause),
        KeyCode::Char('r' | 'R') => Some(Intent::Restart),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Intent::Quit),
        _ => None,
    }
}

/// Map a key event to an intent. Ctrl-C always quits.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Intent::Quit);
    }
    intent_for_code(key.code)
}

/// Whether an intent is driven by a held key (auto-shift / soft drop repeat)
pub fn is_repeatable(intent: Intent) -> bool {
    matches!(intent, Intent::Left | Intent::Right | Intent::SoftDrop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(Intent::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Right)), Some(Intent::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(Intent::SoftDrop));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('H'))), Some(Intent::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('d'))), Some(Intent::Right));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up)), Some(Intent::RotateCw));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(' '))), Some(Intent::HardDrop));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('p'))), Some(Intent::TogglePause));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('R'))), Some(Intent::Restart));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), Some(Intent::Quit));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('q'))), Some(Intent::Quit));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::Quit)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_repeatable_intents() {
        assert!(is_repeatable(Intent::Left));
        assert!(is_repeatable(Intent::SoftDrop));
        assert!(!is_repeatable(Intent::HardDrop));
        assert!(!is_repeatable(Intent::RotateCw));
    }
}
