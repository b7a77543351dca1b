//! Add screen: prompt for a file name and create an empty note.

use log::trace;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use super::adapter::{Adapter, Dims, render_framed};
use super::command::Command;
use super::event::Event;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{TextArea, TextAreaEvent};
use crate::tui::event::Input;

/// Prompt height: one text row plus borders.
const PROMPT_HEIGHT: u16 = 3;

pub struct AddAdapter {
    prompt: TextArea,
    dims: Dims,
}

impl Default for AddAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AddAdapter {
    pub fn new() -> Self {
        Self {
            prompt: TextArea::single_line(" New note ", "file name, e.g. ideas.md"),
            dims: Dims::default(),
        }
    }

    pub fn input(&self) -> &str {
        self.prompt.value()
    }
}

impl Adapter for AddAdapter {
    fn background_update(&mut self, event: &Event) -> Option<Command> {
        self.dims.track(event);
        match event {
            Event::AddRequested => {
                self.prompt.clear();
                None
            }
            // Open what was just created
            Event::NoteCreated(note) => {
                self.prompt.clear();
                Some(Command::Emit(Event::NoteSelected(note.clone())))
            }
            _ => None,
        }
    }

    fn foreground_update(&mut self, event: &Event) -> Option<Command> {
        let Event::Input(input) = event else {
            return None;
        };
        match input {
            Input::Enter => {
                let name = self.prompt.value().trim();
                (!name.is_empty()).then(|| Command::CreateNote(name.to_string()))
            }
            Input::Esc => Some(Command::Emit(Event::AddDismissed)),
            _ => {
                if self.prompt.handle_event(input) == Some(TextAreaEvent::Changed) {
                    trace!("New note name: {:?}", self.prompt.value());
                }
                None
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prompt = &mut self.prompt;
        render_framed(
            frame,
            area,
            self.dims,
            vec![("Enter", "create"), ("Esc", "cancel")],
            |frame, body| {
                let [prompt_area, _] =
                    Layout::vertical([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(0)])
                        .areas(body);
                prompt.render(frame, prompt_area);
            },
        );
    }
}
