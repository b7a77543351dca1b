//! # Viewer Component
//!
//! Read-only, scrollable display of rendered markdown.
//!
//! Each line's wrapped height is measured once per width. Rendering then
//! picks the lines that reach into the viewport and draws only those, so
//! the cost of a frame does not grow with the note. Lines wrap at the
//! terminal width or the configured wrap width, whichever is smaller.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::Input;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Scrolled,
}

pub struct Viewer {
    pub title: String,
    text: Text<'static>,
    wrap_width: u16,
    /// Wrapped height of each line of `text` at `measured_width`
    line_heights: Vec<usize>,
    measured_width: Option<u16>,
    /// First visible wrapped row
    offset: usize,
    viewport_height: usize,
}

impl Viewer {
    pub fn new(wrap_width: u16) -> Self {
        Self {
            title: String::new(),
            text: Text::default(),
            wrap_width,
            line_heights: Vec::new(),
            measured_width: None,
            offset: 0,
            viewport_height: 0,
        }
    }

    /// Show new content from the top.
    pub fn set_content(&mut self, title: impl Into<String>, text: Text<'static>) {
        self.title = title.into();
        self.text = text;
        self.line_heights.clear();
        self.measured_width = None;
        self.offset = 0;
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Largest offset that still fills the viewport (as of the last render).
    pub fn max_offset(&self) -> usize {
        self.content_height().saturating_sub(self.viewport_height)
    }

    fn content_height(&self) -> usize {
        self.line_heights.iter().sum()
    }

    fn measure(&mut self, width: u16) {
        if self.measured_width == Some(width) {
            return;
        }
        self.line_heights = self
            .text
            .lines
            .iter()
            .map(|line| {
                Paragraph::new(line.clone())
                    .wrap(Wrap { trim: false })
                    .line_count(width)
            })
            .collect();
        self.measured_width = Some(width);
    }

    /// Index of the first line in view, and how many of its wrapped rows
    /// sit above the viewport.
    fn window_start(&self) -> (usize, usize) {
        let mut top = 0;
        for (index, height) in self.line_heights.iter().enumerate() {
            if top + height > self.offset {
                return (index, self.offset - top);
            }
            top += height;
        }
        (self.line_heights.len(), 0)
    }

    /// Lines needed to fill the viewport from `first`.
    fn window_lines(&self, first: usize, skip: usize) -> Vec<Line<'static>> {
        let mut rows = 0;
        let mut lines = Vec::new();
        for (line, height) in self.text.lines[first..].iter().zip(&self.line_heights[first..]) {
            if rows >= self.viewport_height + skip {
                break;
            }
            lines.push(line.clone());
            rows += height;
        }
        lines
    }

    fn render_scrollbar(&self, frame: &mut Frame, inner: Rect) {
        let max = self.max_offset();
        if max == 0 || inner.width == 0 {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut state = ScrollbarState::new(max).position(self.offset);
        let scrollbar_area = Rect {
            x: inner.x + inner.width - 1,
            width: 1,
            ..inner
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }

    fn scroll_to(&mut self, y: usize) -> Option<ViewerEvent> {
        let y = y.min(self.max_offset());
        let moved = y != self.offset;
        self.offset = y;
        moved.then_some(ViewerEvent::Scrolled)
    }
}

impl EventHandler for Viewer {
    type Event = ViewerEvent;

    fn handle_event(&mut self, input: &Input) -> Option<ViewerEvent> {
        let offset = self.offset;
        let page = self.viewport_height.max(1);
        match input {
            Input::Up | Input::Char('k') => self.scroll_to(offset.saturating_sub(1)),
            Input::Down | Input::Char('j') => self.scroll_to(offset.saturating_add(1)),
            Input::PageUp => self.scroll_to(offset.saturating_sub(page)),
            Input::PageDown => self.scroll_to(offset.saturating_add(page)),
            Input::Home | Input::Char('g') => self.scroll_to(0),
            Input::End | Input::Char('G') => self.scroll_to(usize::MAX),
            _ => None,
        }
    }
}

impl Component for Viewer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // -1 for the scrollbar column
        let text_width = inner.width.saturating_sub(1).min(self.wrap_width);
        self.measure(text_width);
        self.viewport_height = inner.height as usize;

        // Terminal may have shrunk since the last scroll
        self.offset = self.offset.min(self.max_offset());

        let (first, skip) = self.window_start();
        let mut window = Text::from(self.window_lines(first, skip));
        window.style = self.text.style;
        let paragraph = Paragraph::new(window)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(skip).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, Rect { width: text_width, ..inner });

        self.render_scrollbar(frame, inner);
    }
}
