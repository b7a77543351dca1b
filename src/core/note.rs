//! # Notes
//!
//! A `Note` is one markdown file. Title and description are derived once at
//! construction, so every `Note` value is consistent with its content.
//!
//! ```text
//! .jotter/groceries.md          →  title:       "groceries"
//! ┌──────────────────────┐          description: "Weekly shop"
//! │ # Weekly shop        │          content:     "# Weekly shop\n- milk"
//! │ - milk               │
//! └──────────────────────┘
//! ```
//!
//! Notes are never mutated in place. Editing produces a new value through
//! [`Note::with_content`]; two values with the same path are the same logical
//! note.

use std::path::{Path, PathBuf};

/// File extension shared by every note on disk. Matched ignoring ASCII case.
pub const NOTE_EXTENSION: &str = "md";

/// Whether `path` names a markdown note (`.md`, `.MD`, `.Md`, ...).
pub fn has_note_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXTENSION))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    description: String,
    path: PathBuf,
    content: String,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        Self {
            title: extract_title(&path),
            description: extract_description(&content),
            path,
            content,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Same path, new content. Title and description are re-derived.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self::new(self.path.clone(), content)
    }

    /// Whether `other` refers to the same file.
    pub fn same_note(&self, other: &Note) -> bool {
        self.path == other.path
    }

    /// Text the list filter matches against.
    pub fn filter_value(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

fn extract_title(path: &Path) -> String {
    let name = if has_note_extension(path) {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Text of the first `# ` heading line, or empty.
fn extract_description(content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::to_string)
        .unwrap_or_default()
}
