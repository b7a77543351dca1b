//! # TextArea Component
//!
//! Bordered text buffer with a cursor. Used two ways:
//!
//! - **multi-line**: the note editor. Enter inserts a newline, Up/Down move
//!   between wrapped lines, the view scrolls to keep the cursor visible.
//! - **single-line**: the filename prompt. Newlines are never inserted;
//!   Enter is left for the owner to interpret.
//!
//! The buffer is internal state. Title and placeholder are props.
//! Cursor position and scroll state are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::Input;

use cursor::CursorState;
use text_wrap::{
    inner_width, next_char_boundary, next_word_boundary, prev_char_boundary,
    prev_word_boundary, visible_lines, wrap_line_count, wrap_lines,
};

/// What changed after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAreaEvent {
    /// Buffer content changed
    Changed,
    /// Only the cursor moved
    CursorMoved,
}

pub struct TextArea {
    buffer: String,
    cursor: CursorState,
    multiline: bool,
    /// Block title (Prop)
    pub title: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
}

impl TextArea {
    pub fn multi_line(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: CursorState::new(),
            multiline: true,
            title: title.into(),
            placeholder: String::new(),
        }
    }

    pub fn single_line(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            multiline: false,
            placeholder: placeholder.into(),
            ..Self::multi_line(title)
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer and park the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.buffer = if self.multiline {
            value.to_string()
        } else {
            flatten(value)
        };
        self.cursor.reset();
        self.cursor.move_to_end(&self.buffer);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn insert_str(&mut self, text: &str) -> Option<TextAreaEvent> {
        let text = if self.multiline {
            text.replace("\r\n", "\n")
        } else {
            flatten(text)
        };
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(TextAreaEvent::Changed)
    }

    fn move_cursor_to(&mut self, pos: usize) -> Option<TextAreaEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            TextAreaEvent::CursorMoved
        })
    }

    /// Wrapped lines currently inside the viewport.
    fn visible_text(&self, content_width: u16, visible: u16) -> Vec<Line<'static>> {
        wrap_lines(&self.buffer, inner_width(content_width))
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(visible as usize)
            .map(Line::from)
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, visible: u16) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total = wrap_line_count(&self.buffer, inner_width(area.width));
        if total <= visible {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut state = ScrollbarState::default()
            .content_length(total.saturating_sub(visible) as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

/// Single-line buffers never hold line breaks.
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

impl Component for TextArea {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = visible_lines(area.height);
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width, visible);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(self.title.as_str());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Paragraph::new(self.visible_text(area.width, visible))
        };

        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area, visible);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for TextArea {
    type Event = TextAreaEvent;

    fn handle_event(&mut self, input: &Input) -> Option<Self::Event> {
        match input {
            Input::Char(c) => {
                let mut utf8 = [0; 4];
                self.insert_str(c.encode_utf8(&mut utf8))
            }
            Input::Paste(text) => self.insert_str(text),
            Input::Enter if self.multiline => self.insert_str("\n"),
            Input::Enter => None,
            Input::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(TextAreaEvent::Changed)
            }
            Input::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(TextAreaEvent::Changed)
            }
            Input::Left if self.cursor.pos > 0 => {
                self.move_cursor_to(prev_char_boundary(&self.buffer, self.cursor.pos))
            }
            Input::Right if self.cursor.pos < self.buffer.len() => {
                self.move_cursor_to(next_char_boundary(&self.buffer, self.cursor.pos))
            }
            Input::WordLeft => {
                self.move_cursor_to(prev_word_boundary(&self.buffer, self.cursor.pos))
            }
            Input::WordRight => {
                self.move_cursor_to(next_word_boundary(&self.buffer, self.cursor.pos))
            }
            Input::Home => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_cursor_to(line_start)
            }
            Input::End => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_cursor_to(line_end)
            }
            Input::Up if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(TextAreaEvent::CursorMoved),
            Input::Down if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(TextAreaEvent::CursorMoved),
            _ => None,
        }
    }
}
