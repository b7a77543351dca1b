//! List screen: browse notes, open one, start a new one.

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::adapter::{Adapter, Dims, render_framed};
use super::command::Command;
use super::event::Event;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{NoteList, NoteListEvent};
use crate::tui::event::Input;

pub struct ListAdapter {
    list: NoteList,
    dims: Dims,
}

impl Default for ListAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ListAdapter {
    pub fn new() -> Self {
        Self {
            list: NoteList::new(),
            dims: Dims::default(),
        }
    }

    pub fn list(&self) -> &NoteList {
        &self.list
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.list.is_filtering() {
            vec![("Enter", "apply"), ("Esc", "cancel")]
        } else {
            vec![
                ("Enter", "open"),
                ("n", "new"),
                ("/", "filter"),
                ("q", "quit"),
            ]
        }
    }
}

impl Adapter for ListAdapter {
    fn init(&mut self) -> Option<Command> {
        Some(Command::LoadNotes)
    }

    fn background_update(&mut self, event: &Event) -> Option<Command> {
        self.dims.track(event);
        match event {
            Event::NotesLoaded(notes) => self.list.set_items(notes.clone()),
            Event::EditFinished(note) => self.list.replace_item(note.clone()),
            Event::NoteCreated(note) => self.list.push_item(note.clone()),
            _ => {}
        }
        None
    }

    fn foreground_update(&mut self, event: &Event) -> Option<Command> {
        let Event::Input(input) = event else {
            return None;
        };

        if !self.list.is_filtering() {
            match input {
                Input::Char('n') => return Some(Command::Emit(Event::AddRequested)),
                Input::Char('q') => return Some(Command::Emit(Event::Quit)),
                Input::Enter | Input::Char(' ') => {
                    return self
                        .list
                        .selected_item()
                        .map(|note| Command::Emit(Event::NoteSelected(note.clone())));
                }
                _ => {}
            }
        }

        if self.list.handle_event(input) == Some(NoteListEvent::FilterChanged) {
            debug!(
                "Filter {:?} ({:?}) shows {} of {} notes",
                self.list.filter(),
                self.list.filter_state(),
                self.list.visible_items().count(),
                self.list.items().len()
            );
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = self.hints();
        let list = &mut self.list;
        render_framed(frame, area, self.dims, hints, |frame, body| {
            list.render(frame, body)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_note;

    fn loaded() -> ListAdapter {
        let mut adapter = ListAdapter::new();
        adapter.background_update(&Event::NotesLoaded(vec![
            memory_note("note1", "# First\n"),
            memory_note("note2", "# Second\n"),
        ]));
        adapter
    }

    fn key(input: Input) -> Event {
        Event::Input(input)
    }

    #[test]
    fn init_loads_notes() {
        assert_eq!(ListAdapter::new().init(), Some(Command::LoadNotes));
    }

    #[test]
    fn enter_selects_highlighted_note() {
        let mut adapter = loaded();
        adapter.foreground_update(&key(Input::Down));
        assert_eq!(
            adapter.foreground_update(&key(Input::Enter)),
            Some(Command::Emit(Event::NoteSelected(memory_note("note2", "# Second\n"))))
        );
    }

    #[test]
    fn space_selects_too() {
        let mut adapter = loaded();
        assert!(matches!(
            adapter.foreground_update(&key(Input::Char(' '))),
            Some(Command::Emit(Event::NoteSelected(_)))
        ));
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let mut adapter = ListAdapter::new();
        adapter.background_update(&Event::NotesLoaded(vec![]));
        assert_eq!(adapter.foreground_update(&key(Input::Enter)), None);
    }

    #[test]
    fn n_requests_add_and_q_quits() {
        let mut adapter = loaded();
        assert_eq!(
            adapter.foreground_update(&key(Input::Char('n'))),
            Some(Command::Emit(Event::AddRequested))
        );
        assert_eq!(
            adapter.foreground_update(&key(Input::Char('q'))),
            Some(Command::Emit(Event::Quit))
        );
    }

    #[test]
    fn keys_go_to_filter_while_filtering() {
        let mut adapter = loaded();
        adapter.foreground_update(&key(Input::Char('/')));
        assert_eq!(adapter.foreground_update(&key(Input::Char('n'))), None);
        assert_eq!(adapter.foreground_update(&key(Input::Enter)), None);
        assert_eq!(adapter.list().filter(), "n");
    }

    #[test]
    fn edit_finished_replaces_matching_note() {
        let mut adapter = loaded();
        adapter.background_update(&Event::EditFinished(memory_note("note1", "# Changed\n")));
        let items = adapter.list().items();
        assert_eq!(items[0].description(), "Changed");
        assert_eq!(items[1].description(), "Second");
    }

    #[test]
    fn note_created_appends() {
        let mut adapter = loaded();
        adapter.background_update(&Event::NoteCreated(memory_note("note3", "# note3\n")));
        let titles: Vec<_> = adapter.list().items().iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["note1", "note2", "note3"]);
    }

    #[test]
    fn background_ignores_input() {
        let mut adapter = loaded();
        adapter.background_update(&key(Input::Down));
        assert_eq!(adapter.list().selected_item().unwrap().title(), "note1");
    }
}
