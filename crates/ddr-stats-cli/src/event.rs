//! Event handling for keyboard input

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Wait up to `timeout` for a key press
pub fn poll(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Check if a key event closes the chart (q, Esc or Ctrl+C)
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q' | 'Q'),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } | KeyEvent {
            code: KeyCode::Esc,
            ..
        }
    )
}

/// Check if a key event is a specific character (case-insensitive)
pub fn is_key(key: &KeyEvent, c: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
}
