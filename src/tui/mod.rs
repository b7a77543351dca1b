//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, translates crossterm events
//! into feature [`Event`]s, draws the active screen and runs the
//! [`Command`]s the feature hands back.
//!
//! This is the only module that knows about ratatui's terminal and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//!   poll input (500ms) ──┐
//!   drain pending input ─┼─► feature.update(event) ─► [Command] ─► spawn_blocking
//!   drain results (rx) ──┘                                              │
//!          ▲                                                            │
//!          └──────────────────────── Event (mpsc) ◄─────────────────────┘
//! ```
//!
//! The loop only redraws when an input or a command result arrived.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic.

pub mod component;
pub mod components;
pub mod event;
pub mod markdown;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::style::Color;

use crate::core::config::ResolvedConfig;
use crate::core::{FileNoteStore, NoteStore};
use crate::feature::command::{self, Command};
use crate::feature::{Event, NotesFeature};
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::markdown::{MarkdownRenderer, RenderError};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Why the app could not start or keep running.
#[derive(Debug)]
pub enum RunError {
    Render(RenderError),
    Io(std::io::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Render(e) => write!(f, "{e}"),
            RunError::Io(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        RunError::Io(e)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Editor and prompt draw a cursor
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset on redraw
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Run the app until the user quits.
///
/// Must be called from inside a tokio runtime. Fails before touching the
/// terminal when the configured code theme does not exist.
pub fn run(config: ResolvedConfig) -> Result<(), RunError> {
    let renderer =
        MarkdownRenderer::new(&config.code_theme, Color::Blue).map_err(RunError::Render)?;
    let store: Arc<dyn NoteStore> = Arc::new(FileNoteStore::new(&config.notes_dir));
    info!("Using notes directory {}", config.notes_dir.display());

    let mut feature = NotesFeature::new(renderer, config.wrap_width);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut feature, store);

    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    feature: &mut NotesFeature,
    store: Arc<dyn NoteStore>,
) -> Result<(), RunError> {
    // Channel for events produced by commands
    let (tx, rx) = mpsc::channel();

    execute_all(feature.init(), &store, &tx);

    let size = terminal.size()?;
    let mut pending = vec![Event::Resize {
        width: size.width,
        height: size.height,
    }];
    let mut needs_redraw = true;

    loop {
        // Queued events first (initial resize), then results from commands
        pending.extend(rx.try_iter());
        for event in pending.drain(..) {
            needs_redraw = true;
            if dispatch(feature, event, &store, &tx) {
                return Ok(());
            }
        }

        if needs_redraw {
            terminal.draw(|f| feature.render(f, f.area()))?;
            needs_redraw = false;
        }

        // Process first event + drain everything already waiting before the next draw
        let first_event = poll_event_timeout(IDLE_POLL)?;
        if let Some(event) = first_event {
            pending.push(event);
            while let Some(event) = poll_event_immediate()? {
                pending.push(event);
            }
        }
    }
}

/// Feed one event to the feature. Returns true when the app should quit.
fn dispatch(
    feature: &mut NotesFeature,
    event: Event,
    store: &Arc<dyn NoteStore>,
    tx: &mpsc::Sender<Event>,
) -> bool {
    if event == Event::Quit {
        info!("Quit requested");
        return true;
    }
    debug!("Event loop received: {:?}", event);
    let commands = feature.update(&event);
    execute_all(commands, store, tx);
    false
}

fn execute_all(commands: Vec<Command>, store: &Arc<dyn NoteStore>, tx: &mpsc::Sender<Event>) {
    for command in commands {
        command::spawn(command, Arc::clone(store), tx.clone());
    }
}
