//! View screen: rendered markdown of the selected note.

use log::{error, trace};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Text;

use super::adapter::{Adapter, Dims, render_framed};
use super::command::Command;
use super::event::Event;
use crate::core::Note;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{Viewer, ViewerEvent};
use crate::tui::event::Input;
use crate::tui::markdown::MarkdownRenderer;

pub const RENDER_FAILED_MESSAGE: &str = "Could not render content.";

pub struct ViewAdapter {
    renderer: MarkdownRenderer,
    viewer: Viewer,
    note: Option<Note>,
    dims: Dims,
}

impl ViewAdapter {
    pub fn new(renderer: MarkdownRenderer, wrap_width: u16) -> Self {
        Self {
            renderer,
            viewer: Viewer::new(wrap_width),
            note: None,
            dims: Dims::default(),
        }
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    fn show(&mut self, note: &Note) {
        let text = self.renderer.render(note.content()).unwrap_or_else(|e| {
            error!("Failed to render {}: {}", note.path().display(), e);
            Text::from(RENDER_FAILED_MESSAGE)
        });
        self.viewer.set_content(note.title(), text);
        self.note = Some(note.clone());
    }
}

impl Adapter for ViewAdapter {
    fn background_update(&mut self, event: &Event) -> Option<Command> {
        self.dims.track(event);
        match event {
            Event::NoteSelected(note) | Event::EditFinished(note) => self.show(note),
            _ => {}
        }
        None
    }

    fn foreground_update(&mut self, event: &Event) -> Option<Command> {
        let Event::Input(input) = event else {
            return None;
        };
        match input {
            Input::Esc => Some(Command::Emit(Event::ViewDismissed)),
            Input::Enter | Input::Char(' ') => self
                .note
                .as_ref()
                .map(|_| Command::Emit(Event::EditRequested)),
            _ => {
                if let Some(ViewerEvent::Scrolled) = self.viewer.handle_event(input) {
                    trace!(
                        "Viewer at line {} of {}",
                        self.viewer.scroll_offset(),
                        self.viewer.max_offset()
                    );
                }
                None
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let viewer = &mut self.viewer;
        render_framed(
            frame,
            area,
            self.dims,
            vec![("Enter", "edit"), ("↑↓", "scroll"), ("Esc", "back")],
            |frame, body| viewer.render(frame, body),
        );
    }
}
