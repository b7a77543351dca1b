//! # Notes Feature
//!
//! The orchestrator. Owns the active [`Mode`] and one adapter per mode, and
//! is the only thing the host loop talks to.
//!
//! ```text
//!                 event
//!                   │
//!          ┌────────▼─────────┐
//!          │ Mode::after(ev)  │  1. transition first
//!          └────────┬─────────┘
//!                   │
//!   ┌───────────────▼────────────────┐
//!   │ active adapter.foreground(ev)  │  2. only the active screen
//!   └───────────────┬────────────────┘
//!                   │
//!   ┌───────────────▼────────────────┐
//!   │ list/view/edit/add.background  │  3. every screen, fixed order
//!   └───────────────┬────────────────┘
//!                   │
//!               [Command]               4. one batch back to the host
//! ```
//!
//! Nothing here does I/O. The store is reached only through the commands
//! the host runs.

pub mod adapter;
pub mod add;
pub mod command;
pub mod edit;
pub mod event;
pub mod list;
pub mod mode;
pub mod view;

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use adapter::Adapter;
pub use command::Command;
pub use event::Event;
pub use mode::Mode;

use add::AddAdapter;
use edit::EditAdapter;
use list::ListAdapter;
use view::ViewAdapter;

use crate::tui::markdown::MarkdownRenderer;

pub struct NotesFeature {
    mode: Mode,
    list: ListAdapter,
    view: ViewAdapter,
    edit: EditAdapter,
    add: AddAdapter,
}

impl NotesFeature {
    pub fn new(renderer: MarkdownRenderer, wrap_width: u16) -> Self {
        Self {
            mode: Mode::default(),
            list: ListAdapter::new(),
            view: ViewAdapter::new(renderer, wrap_width),
            edit: EditAdapter::new(),
            add: AddAdapter::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn list(&self) -> &ListAdapter {
        &self.list
    }

    pub fn view(&self) -> &ViewAdapter {
        &self.view
    }

    pub fn edit(&self) -> &EditAdapter {
        &self.edit
    }

    pub fn add(&self) -> &AddAdapter {
        &self.add
    }

    fn active(&mut self) -> &mut dyn Adapter {
        match self.mode {
            Mode::List => &mut self.list,
            Mode::View => &mut self.view,
            Mode::Edit => &mut self.edit,
            Mode::Add => &mut self.add,
        }
    }

    fn adapters(&mut self) -> [&mut dyn Adapter; 4] {
        [&mut self.list, &mut self.view, &mut self.edit, &mut self.add]
    }

    /// Startup commands from every adapter.
    pub fn init(&mut self) -> Vec<Command> {
        self.adapters()
            .into_iter()
            .filter_map(|adapter| adapter.init())
            .collect()
    }

    pub fn update(&mut self, event: &Event) -> Vec<Command> {
        if let Some(next) = Mode::after(event)
            && next != self.mode
        {
            debug!("Mode {:?} -> {:?}", self.mode, next);
            self.mode = next;
        }

        let mut commands: Vec<Command> = self.active().foreground_update(event).into_iter().collect();
        commands.extend(
            self.adapters()
                .into_iter()
                .filter_map(|adapter| adapter.background_update(event)),
        );
        commands
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.active().render(frame, area);
    }
}
