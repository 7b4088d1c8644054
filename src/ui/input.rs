//! Keyboard and resize input.
//!
//! Collects every pending terminal event into state-machine messages.
//! Key presses are reduced to canonical names first ("up", "q", "ctrl+c")
//! and only then mapped to game keys, so bindings live in one place
//! (`Key::from_name`). Release events are ignored.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::event::{Key, Msg};

pub struct InputState {
    /// Messages collected during the most recent `poll()`.
    pending: Vec<Msg>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { pending: Vec::with_capacity(8) }
    }

    /// Wait up to `timeout` for the first event, then drain whatever else
    /// is already queued without blocking.
    pub fn poll(&mut self, timeout: Duration) -> std::io::Result<Vec<Msg>> {
        self.pending.clear();

        let mut wait = timeout;
        while event::poll(wait)? {
            if let Some(msg) = translate(event::read()?) {
                self.pending.push(msg);
            }
            wait = Duration::ZERO;
        }

        Ok(std::mem::take(&mut self.pending))
    }
}

fn translate(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            key_name(&key).as_deref().and_then(Key::from_name).map(Msg::Key)
        }
        Event::Resize(width, height) => Some(Msg::Resize { width, height }),
        _ => None,
    }
}

/// Canonical, lowercase name of a key press.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().collect(),
        _ => return None,
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("ctrl+{base}"))
    } else {
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn names_are_canonical() {
        let k = |code, m| key_name(&KeyEvent::new(code, m));
        assert_eq!(k(KeyCode::Up, KeyModifiers::NONE).as_deref(), Some("up"));
        assert_eq!(k(KeyCode::Char('Q'), KeyModifiers::SHIFT).as_deref(), Some("q"));
        assert_eq!(k(KeyCode::Char('c'), KeyModifiers::CONTROL).as_deref(), Some("ctrl+c"));
        assert_eq!(k(KeyCode::F(1), KeyModifiers::NONE), None);
    }

    #[test]
    fn arrows_and_quit_keys_translate() {
        assert_eq!(translate(press(KeyCode::Left, KeyModifiers::NONE)), Some(Msg::Key(Key::Left)));
        assert_eq!(translate(press(KeyCode::Char('w'), KeyModifiers::NONE)), Some(Msg::Key(Key::Up)));
        assert_eq!(translate(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Msg::Key(Key::Quit)));
        assert_eq!(
            translate(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Key(Key::Quit)),
        );
        assert_eq!(translate(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(key)), None);
    }

    #[test]
    fn resize_becomes_message() {
        assert_eq!(
            translate(Event::Resize(120, 40)),
            Some(Msg::Resize { width: 120, height: 40 }),
        );
    }
}
