//! # Commands
//!
//! Deferred work an adapter asks for. Adapters never touch the store: they
//! return a `Command`, the host runs it and feeds the resulting [`Event`] back
//! through `update`.
//!
//! ```text
//! update(event) → [Command] → host runs each → Option<Event> → update(...)
//! ```
//!
//! Each command yields at most one event. Store failures are logged here and
//! never reach the adapters as errors.

use std::sync::{Arc, mpsc};

use log::{debug, error, warn};

use super::event::Event;
use crate::core::{Note, NoteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed an event straight back, no I/O.
    Emit(Event),
    LoadNotes,
    SaveNote(Note),
    CreateNote(String),
}

impl Command {
    /// Run the command to completion on the current thread.
    pub fn run(self, store: &dyn NoteStore) -> Option<Event> {
        match self {
            Command::Emit(event) => Some(event),
            Command::LoadNotes => match store.list_all() {
                Ok(notes) => {
                    debug!("Loaded {} notes", notes.len());
                    Some(Event::NotesLoaded(notes))
                }
                Err(e) => {
                    error!("Failed to load notes: {}", e);
                    Some(Event::NotesLoaded(Vec::new()))
                }
            },
            Command::SaveNote(note) => match store.save(&note) {
                Ok(()) => {
                    debug!("Saved {}", note.path().display());
                    Some(Event::EditFinished(note))
                }
                Err(e) => {
                    error!("Failed to save {}: {}", note.path().display(), e);
                    None
                }
            },
            Command::CreateNote(name) => match store.create_empty(&name) {
                Ok(note) => {
                    debug!("Created {}", note.path().display());
                    Some(Event::NoteCreated(note))
                }
                Err(e) => {
                    warn!("Failed to create note '{}': {}", name, e);
                    None
                }
            },
        }
    }
}

/// Run `command` on tokio's blocking pool and send its event to `tx`.
///
/// Must be called from inside a tokio runtime.
pub fn spawn(command: Command, store: Arc<dyn NoteStore>, tx: mpsc::Sender<Event>) {
    debug!("Spawning command: {:?}", command);
    tokio::task::spawn_blocking(move || {
        if let Some(event) = command.run(store.as_ref())
            && tx.send(event).is_err()
        {
            warn!("Dropped command result: receiver closed");
        }
    });
}
