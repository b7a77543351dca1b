use ratatui::layout::Rect;
use ratatui::Frame;

use super::event::Input;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to:
/// 1. Update internal caches (e.g. wrapped-line layout).
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes raw input.
pub trait EventHandler {
    /// What the component reports back after handling input.
    type Event;

    /// Handle one input and optionally report what changed.
    fn handle_event(&mut self, input: &Input) -> Option<Self::Event>;
}
