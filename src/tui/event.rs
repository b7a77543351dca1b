use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};

use crate::feature::Event;

/// Raw user input, already stripped of terminal-specific encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Paste(String), // Bracketed paste - preserves newlines
    Enter,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    WordLeft,  // Ctrl/Alt+Left
    WordRight, // Ctrl/Alt+Right
}

/// Poll for an event with timeout (blocks up to `timeout`)
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<Event>> {
    poll_event_timeout(Duration::ZERO)
}

fn translate(term_event: TermEvent) -> Option<Event> {
    match term_event {
        TermEvent::Key(key_event) => {
            // Only presses (and auto-repeat) count; releases would double every key
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            let word_jump = key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            let input = match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(Event::Quit),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Input::Enter,
                (_, KeyCode::Char(c)) => Input::Char(c),
                (_, KeyCode::Enter) => Input::Enter,
                (_, KeyCode::Esc) => Input::Esc,
                (_, KeyCode::Backspace) => Input::Backspace,
                (_, KeyCode::Delete) => Input::Delete,
                (_, KeyCode::Left) if word_jump => Input::WordLeft,
                (_, KeyCode::Right) if word_jump => Input::WordRight,
                (_, KeyCode::Left) => Input::Left,
                (_, KeyCode::Right) => Input::Right,
                (_, KeyCode::Up) => Input::Up,
                (_, KeyCode::Down) => Input::Down,
                (_, KeyCode::Home) => Input::Home,
                (_, KeyCode::End) => Input::End,
                (_, KeyCode::PageUp) => Input::PageUp,
                (_, KeyCode::PageDown) => Input::PageDown,
                _ => return None,
            };
            Some(Event::Input(input))
        }
        TermEvent::Paste(data) => Some(Event::Input(Input::Paste(data))),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
