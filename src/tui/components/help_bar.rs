//! # HelpBar Component
//!
//! One-line strip of key hints shown under each screen.
//!
//! Purely presentational: the owning screen passes its hints as props and the
//! bar renders them left to right, dropping whatever does not fit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct HelpBar {
    /// (key, action) pairs, e.g. `("Esc", "back")`
    pub hints: Vec<(&'static str, &'static str)>,
}

impl HelpBar {
    pub fn new(hints: Vec<(&'static str, &'static str)>) -> Self {
        Self { hints }
    }
}

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let action_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {action}"), action_style));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
