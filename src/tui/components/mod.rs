//! # TUI Components
//!
//! Leaf widgets. None of them know about modes, notes on disk or each other.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `HelpBar`: key hints under each screen
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and report what they did through their
//! own event type (`EventHandler::Event`):
//! - `NoteList`: selectable notes with a fuzzy filter
//! - `TextArea`: multi-line editor, or single-line prompt
//! - `Viewer`: scrollable rendered markdown
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── help_bar.rs      (Key hints)
//! ├── note_list.rs     (Note browser + filter)
//! ├── viewer.rs        (Scrollable markdown)
//! └── text_area/       (Editor and prompt)
//! ```

mod help_bar;
pub use help_bar::HelpBar;

pub mod note_list;
pub use note_list::{FilterState, NoteList, NoteListEvent};
pub mod text_area;
pub use text_area::{TextArea, TextAreaEvent};
pub mod viewer;
pub use viewer::{Viewer, ViewerEvent};
