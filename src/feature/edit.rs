//! Edit screen: raw markdown of the selected note in a text editor.
//! Esc saves and returns to the view. The editor title carries `[+]` while
//! the buffer differs from what was last loaded or saved.

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::adapter::{Adapter, Dims, render_framed};
use super::command::Command;
use super::event::Event;
use crate::core::Note;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{TextArea, TextAreaEvent};
use crate::tui::event::Input;

pub struct EditAdapter {
    editor: TextArea,
    note: Option<Note>,
    modified: bool,
    dims: Dims,
}

impl Default for EditAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EditAdapter {
    pub fn new() -> Self {
        Self {
            editor: TextArea::multi_line(""),
            note: None,
            modified: false,
            dims: Dims::default(),
        }
    }

    pub fn buffer(&self) -> &str {
        self.editor.value()
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// Buffer changed since the note was loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
        let title = self.note.as_ref().map(Note::title).unwrap_or_default();
        self.editor.title = if modified {
            format!(" {title} [+] ")
        } else {
            format!(" {title} ")
        };
    }
}

impl Adapter for EditAdapter {
    fn background_update(&mut self, event: &Event) -> Option<Command> {
        self.dims.track(event);
        match event {
            Event::NoteSelected(note) => {
                self.editor.set_value(note.content());
                self.note = Some(note.clone());
                self.set_modified(false);
            }
            Event::EditFinished(note) => {
                self.note = Some(note.clone());
                self.set_modified(self.editor.value() != note.content());
            }
            _ => {}
        }
        None
    }

    fn foreground_update(&mut self, event: &Event) -> Option<Command> {
        let Event::Input(input) = event else {
            return None;
        };
        match input {
            Input::Esc => self.note.as_ref().map(|note| {
                debug!("Saving {} (modified: {})", note.path().display(), self.modified);
                Command::SaveNote(note.with_content(self.editor.value()))
            }),
            _ => {
                if self.editor.handle_event(input) == Some(TextAreaEvent::Changed)
                    && !self.modified
                {
                    self.set_modified(true);
                }
                None
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let editor = &mut self.editor;
        render_framed(
            frame,
            area,
            self.dims,
            vec![("Esc", "save"), ("Ctrl+C", "quit")],
            |frame, body| editor.render(frame, body),
        );
    }
}
