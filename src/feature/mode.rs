//! # Modes
//!
//! Which screen owns the keyboard. Exactly one mode is active at a time and
//! only [`Mode::after`] decides when that changes.

use super::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    View,
    Edit,
    Add,
}

impl Mode {
    /// Mode that `event` switches to, or `None` when it leaves the mode alone.
    ///
    /// Depends on the event only, never on the current mode.
    pub fn after(event: &Event) -> Option<Mode> {
        match event {
            Event::NoteSelected(_) => Some(Mode::View),
            Event::ViewDismissed => Some(Mode::List),
            Event::EditRequested => Some(Mode::Edit),
            Event::EditFinished(_) => Some(Mode::View),
            Event::AddRequested => Some(Mode::Add),
            Event::AddDismissed => Some(Mode::List),
            Event::NoteCreated(_) => Some(Mode::List),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Note;
    use crate::tui::event::Input;

    fn note() -> Note {
        Note::new("/n/a.md", "# A\n")
    }

    #[test]
    fn transition_table() {
        let cases = [
            (Event::NoteSelected(note()), Some(Mode::View)),
            (Event::ViewDismissed, Some(Mode::List)),
            (Event::EditRequested, Some(Mode::Edit)),
            (Event::EditFinished(note()), Some(Mode::View)),
            (Event::AddRequested, Some(Mode::Add)),
            (Event::AddDismissed, Some(Mode::List)),
            (Event::NoteCreated(note()), Some(Mode::List)),
        ];
        for (event, expected) in cases {
            assert_eq!(Mode::after(&event), expected, "{event:?}");
        }
    }

    #[test]
    fn other_events_keep_mode() {
        let events = [
            Event::Resize { width: 80, height: 24 },
            Event::Input(Input::Enter),
            Event::NotesLoaded(vec![note()]),
            Event::Quit,
        ];
        for event in events {
            assert_eq!(Mode::after(&event), None, "{event:?}");
        }
    }

    #[test]
    fn starts_in_list() {
        assert_eq!(Mode::default(), Mode::List);
    }
}
