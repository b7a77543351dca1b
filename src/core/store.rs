//! # Note Store
//!
//! File-backed persistence: every `*.md` file directly inside the base
//! directory is a note. The [`NoteStore`] trait is the seam the rest of the
//! app talks to, so tests can swap in an in-memory store.

use log::{debug, info, warn};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::note::{NOTE_EXTENSION, Note, has_note_extension};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    InvalidName(String),
    AlreadyExists(PathBuf),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "note I/O error at {}: {source}", path.display())
            }
            StoreError::InvalidName(name) => write!(f, "invalid note name: {name:?}"),
            StoreError::AlreadyExists(path) => {
                write!(f, "note already exists: {}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Store Trait
// ============================================================================

pub trait NoteStore: Send + Sync {
    /// All notes in the base directory, ordered by path.
    fn list_all(&self) -> Result<Vec<Note>, StoreError>;

    /// Read `<base>/<title>.md`.
    fn get_by_title(&self, title: &str) -> Result<Note, StoreError>;

    /// Overwrite the file at the note's path with its content.
    fn save(&self, note: &Note) -> Result<(), StoreError>;

    /// Create a new note with placeholder content. `.md` is appended when
    /// `filename` has no extension.
    fn create_empty(&self, filename: &str) -> Result<Note, StoreError>;
}

/// Placeholder written into freshly created notes.
pub fn placeholder_content(title: &str) -> String {
    format!("# {title}\n")
}

/// Normalise a user-supplied filename into `<name>.md`. An existing `.md`
/// extension in any case (`notes.MD`) is kept as typed.
pub fn note_file_name(filename: &str) -> Result<String, StoreError> {
    let name = filename.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(StoreError::InvalidName(filename.to_string()));
    }
    if has_note_extension(Path::new(name)) {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.{NOTE_EXTENSION}"))
    }
}

// ============================================================================
// File Store
// ============================================================================

pub struct FileNoteStore {
    base_dir: PathBuf,
}

impl FileNoteStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn read_note(path: &Path) -> Result<Note, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Ok(Note::new(path, content))
    }
}

impl NoteStore for FileNoteStore {
    fn list_all(&self) -> Result<Vec<Note>, StoreError> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "Notes directory {} does not exist yet, no notes loaded",
                    self.base_dir.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.base_dir, e)),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", self.base_dir.display(), e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter(|path| has_note_extension(path))
            .collect();
        paths.sort();

        let notes: Vec<Note> = paths
            .iter()
            .filter_map(|path| match Self::read_note(path) {
                Ok(note) => Some(note),
                Err(e) => {
                    warn!("Skipping unreadable note: {}", e);
                    None
                }
            })
            .collect();

        info!("Loaded {} notes from {}", notes.len(), self.base_dir.display());
        Ok(notes)
    }

    fn get_by_title(&self, title: &str) -> Result<Note, StoreError> {
        let path = self.base_dir.join(note_file_name(title)?);
        Self::read_note(&path)
    }

    fn save(&self, note: &Note) -> Result<(), StoreError> {
        fs::write(note.path(), note.content()).map_err(|e| StoreError::io(note.path(), e))?;
        debug!("Saved note {} ({} bytes)", note.path().display(), note.content().len());
        Ok(())
    }

    fn create_empty(&self, filename: &str) -> Result<Note, StoreError> {
        let path = self.base_dir.join(note_file_name(filename)?);

        fs::create_dir_all(&self.base_dir).map_err(|e| StoreError::io(&self.base_dir, e))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.clone()),
                _ => StoreError::io(&path, e),
            })?;

        // Title derivation lives on Note; build first, then write its placeholder.
        let title = Note::new(&path, "").title().to_string();
        let note = Note::new(&path, placeholder_content(&title));
        file.write_all(note.content().as_bytes())
            .map_err(|e| StoreError::io(&path, e))?;

        info!("Created note {}", path.display());
        Ok(note)
    }
}
