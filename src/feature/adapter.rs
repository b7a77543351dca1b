//! # Adapters
//!
//! Every screen sits behind the same four-call contract so the orchestrator
//! can treat them alike:
//!
//! - `init`: startup work, once
//! - `background_update`: sees every event, whether or not the screen is active
//! - `foreground_update`: sees events only while the screen is active
//! - `render`: draws the screen
//!
//! Screens also share the outer frame: a margin of [`FRAME_WIDTH`] columns
//! and [`FRAME_HEIGHT`] rows around the content.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use super::command::Command;
use super::event::Event;
use crate::tui::component::Component;
use crate::tui::components::HelpBar;

/// Columns taken by the frame (left + right).
pub const FRAME_WIDTH: u16 = 4;
/// Rows taken by the frame (top + bottom).
pub const FRAME_HEIGHT: u16 = 2;

pub const FALLBACK_MESSAGE: &str = "Could not render application";

pub trait Adapter {
    fn init(&mut self) -> Option<Command> {
        None
    }

    fn background_update(&mut self, event: &Event) -> Option<Command>;

    fn foreground_update(&mut self, event: &Event) -> Option<Command>;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Content size last reported by a `Resize`, frame already removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dims {
    pub width: u16,
    pub height: u16,
}

impl Dims {
    pub fn from_terminal(width: u16, height: u16) -> Self {
        Self {
            width: width.saturating_sub(FRAME_WIDTH),
            height: height.saturating_sub(FRAME_HEIGHT),
        }
    }

    /// Adopt the size carried by a `Resize` event. Other events are ignored.
    pub fn track(&mut self, event: &Event) {
        if let Event::Resize { width, height } = event {
            *self = Self::from_terminal(*width, *height);
        }
    }

    /// Content rect inside `area`: inset by half the frame on each side,
    /// sized to these dims and clipped to `area`.
    pub fn inset(&self, area: Rect) -> Rect {
        Rect::new(
            area.x + FRAME_WIDTH / 2,
            area.y + FRAME_HEIGHT / 2,
            self.width,
            self.height,
        )
        .intersection(area)
    }
}

/// Draw a screen body plus its help bar inside the framed area, or the
/// fallback message when nothing fits.
pub fn render_framed(
    frame: &mut Frame,
    area: Rect,
    dims: Dims,
    hints: Vec<(&'static str, &'static str)>,
    body: impl FnOnce(&mut Frame, Rect),
) {
    let inner = dims.inset(area);
    if inner.is_empty() {
        render_fallback(frame, area);
        return;
    }

    let [body_area, help_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    body(frame, body_area);
    HelpBar::new(hints).render(frame, help_area);
}

pub fn render_fallback(frame: &mut Frame, area: Rect) {
    let message = Paragraph::new(FALLBACK_MESSAGE)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(message, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn dims_subtract_frame() {
        assert_eq!(Dims::from_terminal(80, 24), Dims { width: 76, height: 22 });
    }

    #[test]
    fn dims_saturate_on_tiny_terminal() {
        assert_eq!(Dims::from_terminal(3, 1), Dims { width: 0, height: 0 });
    }

    #[test]
    fn track_only_follows_resize() {
        let mut dims = Dims::default();
        dims.track(&Event::Quit);
        assert_eq!(dims, Dims::default());
        dims.track(&Event::Resize { width: 10, height: 6 });
        assert_eq!(dims, Dims { width: 6, height: 4 });
    }

    #[test]
    fn inset_centres_content_and_clips() {
        let dims = Dims::from_terminal(80, 24);
        assert_eq!(dims.inset(Rect::new(0, 0, 80, 24)), Rect::new(2, 1, 76, 22));
        // Terminal shrank without a resize yet
        assert_eq!(dims.inset(Rect::new(0, 0, 40, 10)), Rect::new(2, 1, 38, 9));
    }

    #[test]
    fn empty_inset_draws_fallback() {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|f| {
                render_framed(f, f.area(), Dims::default(), vec![], |_, _| {
                    panic!("body must not render into an empty rect")
                })
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(FALLBACK_MESSAGE));
    }
}
