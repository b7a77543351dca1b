//! # Note List Component
//!
//! Selectable list of notes with an optional fuzzy filter.
//!
//! Each row shows the note title and, on a second dimmed line, its
//! description. `/` opens the filter prompt; while it is open every key edits
//! the query, Enter keeps the filter and Esc throws it away.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph};

use crate::core::Note;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::Input;

/// Rows each item takes on screen.
const ITEM_HEIGHT: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// Query being typed.
    Filtering,
    /// Query committed; navigation works on the filtered rows.
    FilterApplied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListEvent {
    SelectionChanged,
    FilterChanged,
}

pub struct NoteList {
    items: Vec<Note>,
    /// Indices into `items` that pass the filter, in item order.
    visible: Vec<usize>,
    filter: String,
    filter_state: FilterState,
    list_state: ListState,
    /// Rows per page from the last render, used by PageUp/PageDown.
    page_size: usize,
}

impl Default for NoteList {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            list_state: ListState::default(),
            page_size: 1,
        }
    }

    pub fn items(&self) -> &[Note] {
        &self.items
    }

    /// Replace every item, keeping the active filter.
    pub fn set_items(&mut self, items: Vec<Note>) {
        self.items = items;
        self.refilter();
    }

    /// Replace the first item for the same note. No-op when absent.
    pub fn replace_item(&mut self, note: Note) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.same_note(&note)) {
            *slot = note;
            self.refilter();
        }
    }

    pub fn push_item(&mut self, note: Note) {
        self.items.push(note);
        self.refilter();
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// True while keystrokes go to the filter prompt.
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    /// Notes currently shown, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Note> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn selected_item(&self) -> Option<&Note> {
        self.list_state
            .selected()
            .and_then(|row| self.visible.get(row))
            .map(|&i| &self.items[i])
    }

    fn refilter(&mut self) {
        let previous = self.selected_item().map(|n| n.path().to_path_buf());

        let tokens: Vec<String> = self
            .filter
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.visible = if tokens.is_empty() {
            (0..self.items.len()).collect()
        } else {
            let matcher = SkimMatcherV2::default();
            self.items
                .iter()
                .enumerate()
                .filter(|(_, note)| {
                    let value = note.filter_value().to_lowercase();
                    tokens
                        .iter()
                        .all(|token| matcher.fuzzy_match(&value, token).is_some())
                })
                .map(|(i, _)| i)
                .collect()
        };

        // Keep the same note selected when it survives the filter
        let row = previous
            .and_then(|path| {
                self.visible
                    .iter()
                    .position(|&i| self.items[i].path() == path)
            })
            .or(if self.visible.is_empty() { None } else { Some(0) });
        self.list_state.select(row);
    }

    fn select_row(&mut self, row: usize) {
        if self.visible.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(row.min(self.visible.len() - 1)));
        }
    }

    fn move_by(&mut self, delta: isize) -> Option<NoteListEvent> {
        let current = self.list_state.selected()?;
        let target = current.saturating_add_signed(delta);
        self.select_row(target);
        (self.list_state.selected() != Some(current)).then_some(NoteListEvent::SelectionChanged)
    }

    fn handle_filter_input(&mut self, input: &Input) -> Option<NoteListEvent> {
        match input {
            Input::Char(c) => self.filter.push(*c),
            Input::Paste(text) => self.filter.extend(text.chars().filter(|c| !c.is_control())),
            Input::Backspace => {
                self.filter.pop()?;
            }
            Input::Enter => {
                self.filter_state = if self.filter.trim().is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
                return None;
            }
            Input::Esc => {
                self.reset_filter();
                return Some(NoteListEvent::FilterChanged);
            }
            _ => return None,
        }
        self.refilter();
        Some(NoteListEvent::FilterChanged)
    }

    fn reset_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }
}

impl EventHandler for NoteList {
    type Event = NoteListEvent;

    fn handle_event(&mut self, input: &Input) -> Option<NoteListEvent> {
        if self.is_filtering() {
            return self.handle_filter_input(input);
        }

        let page = self.page_size.max(1) as isize;
        match input {
            Input::Up | Input::Char('k') => self.move_by(-1),
            Input::Down | Input::Char('j') => self.move_by(1),
            Input::PageUp => self.move_by(-page),
            Input::PageDown => self.move_by(page),
            Input::Home | Input::Char('g') => self.move_by(isize::MIN),
            Input::End | Input::Char('G') => self.move_by(isize::MAX),
            Input::Char('/') => {
                self.filter_state = FilterState::Filtering;
                Some(NoteListEvent::FilterChanged)
            }
            Input::Esc if self.filter_state == FilterState::FilterApplied => {
                self.reset_filter();
                Some(NoteListEvent::FilterChanged)
            }
            _ => None,
        }
    }
}

impl Component for NoteList {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let show_prompt = self.filter_state != FilterState::Unfiltered;
        let [prompt_area, list_area] = if show_prompt {
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area)
        } else {
            Layout::vertical([Constraint::Length(0), Constraint::Min(0)]).areas(area)
        };

        if show_prompt {
            let style = if self.is_filtering() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let prompt = Line::from(vec![
                Span::styled("Filter: ", style.add_modifier(Modifier::BOLD)),
                Span::styled(self.filter.clone(), style),
            ]);
            frame.render_widget(Paragraph::new(prompt), prompt_area);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Notes ({}) ", self.visible.len()))
            .padding(Padding::horizontal(1));

        self.page_size = (list_area.height.saturating_sub(2) / ITEM_HEIGHT).max(1) as usize;

        if self.visible.is_empty() {
            let message = if self.items.is_empty() {
                "No notes yet. Press n to create one."
            } else {
                "No notes match the filter."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let note = &self.items[i];
                ListItem::new(vec![
                    Line::from(Span::styled(
                        note.title().to_string(),
                        Style::default().fg(Color::White),
                    )),
                    Line::from(Span::styled(
                        note.description().to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        frame.render_stateful_widget(list, list_area, &mut self.list_state);
    }
}
