//! Jotter: markdown notes in the terminal.
//!
//! - [`core`]: notes, the file store, settings
//! - [`feature`]: modes, screens and the orchestrator that routes events
//! - [`tui`]: terminal host loop and widgets

pub mod core;
pub mod feature;
pub mod tui;

#[cfg(test)]
pub mod test_support;
