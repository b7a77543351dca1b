//! # Events
//!
//! Everything that can happen in Jotter becomes an `Event`.
//! User presses a key? That's `Event::Input(Input::Char('n'))`.
//! The store finished listing notes? That's `Event::NotesLoaded(notes)`.
//!
//! Events are plain values. They carry no behaviour; the orchestrator and
//! its adapters decide what each one means.

use crate::core::Note;
use crate::tui::event::Input;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Terminal size in cells, frame included.
    Resize { width: u16, height: u16 },
    Input(Input),
    NotesLoaded(Vec<Note>),
    NoteSelected(Note),
    ViewDismissed,
    EditRequested,
    /// A note was saved with new content.
    EditFinished(Note),
    AddRequested,
    AddDismissed,
    NoteCreated(Note),
    Quit,
}
