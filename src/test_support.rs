//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::store::{note_file_name, placeholder_content};
use crate::core::{Note, NoteStore, StoreError};

pub const MEMORY_BASE: &str = "/notes";

/// In-memory `NoteStore` with a switch that makes every call fail.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
    saved: Mutex<Vec<Note>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every note passed to `save`, in call order.
    pub fn saved(&self) -> Vec<Note> {
        self.saved.lock().unwrap().clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Io {
                path: PathBuf::from(MEMORY_BASE),
                source: io::Error::other("store unavailable"),
            })
        } else {
            Ok(())
        }
    }
}

impl NoteStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Note>, StoreError> {
        self.check()?;
        Ok(self.notes())
    }

    fn get_by_title(&self, title: &str) -> Result<Note, StoreError> {
        self.check()?;
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.title() == title)
            .cloned()
            .ok_or_else(|| StoreError::Io {
                path: note_path(title),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn save(&self, note: &Note) -> Result<(), StoreError> {
        self.check()?;
        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|n| n.same_note(note)) {
            Some(slot) => *slot = note.clone(),
            None => notes.push(note.clone()),
        }
        self.saved.lock().unwrap().push(note.clone());
        Ok(())
    }

    fn create_empty(&self, filename: &str) -> Result<Note, StoreError> {
        self.check()?;
        let file_name = note_file_name(filename)?;
        let path = PathBuf::from(MEMORY_BASE).join(&file_name);
        let mut notes = self.notes.lock().unwrap();
        if notes.iter().any(|n| n.path() == path) {
            return Err(StoreError::AlreadyExists(path));
        }
        let title = file_name.trim_end_matches(".md");
        let note = Note::new(path, placeholder_content(title));
        notes.push(note.clone());
        Ok(note)
    }
}

/// Path a note with `title` has inside the memory store.
pub fn note_path(title: &str) -> PathBuf {
    PathBuf::from(MEMORY_BASE).join(format!("{title}.md"))
}

/// A note that lives in the memory store.
pub fn memory_note(title: &str, content: &str) -> Note {
    Note::new(note_path(title), content)
}
