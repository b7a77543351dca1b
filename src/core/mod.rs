//! # Core
//!
//! Jotter's domain layer. It knows nothing about terminals or widgets.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Note (domain value)  │
//!                    │  • NoteStore (files)    │
//!                    │  • Config (settings)    │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐           ┌──────────────┐
//!             │  feature   │           │     tui      │
//!             │ (modes +   │◄──────────│ (host loop + │
//!             │  adapters) │           │   widgets)   │
//!             └────────────┘           └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`note`]: The `Note` value: path, title, description and content
//! - [`store`]: The `NoteStore` trait and its file-backed implementation
//! - [`config`]: Settings resolution (defaults → file → env → CLI)

pub mod config;
pub mod note;
pub mod store;

pub use note::Note;
pub use store::{FileNoteStore, NoteStore, StoreError};
