//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the session, and
//! translates keyboard events into `core::Action` values through the keymap.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop blocks on crossterm for up to a second. Any event, or a timeout
//! where the wall clock has rolled over to a new minute, marks the frame
//! dirty; otherwise nothing is drawn. All pending events are drained before
//! the next draw so a paste or key repeat costs one frame, not one per key.
//!
//! The cursor is a blinking bar while the editor has focus. ratatui shows
//! and hides it on each draw depending on whether a component placed it.

mod component;
mod components;
mod event;
mod keymap;
pub mod markdown;
pub mod palette;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use chrono::Timelike;
use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use log::{debug, info};

use crate::core::action::{Action, Collaborators, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{Mode, Session};
use crate::tui::components::EditorScroll;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Presentation state that outlives a single frame (not part of the core
/// session).
#[derive(Debug, Default)]
pub struct TuiState {
    pub editor_scroll: EditorScroll,
    /// Viewer scroll limit measured by the last draw, not yet reported
    pub viewer_measured: Option<u16>,
}

/// Restores terminal modes on every exit path, panics included.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Show
        );
    }
}

fn focus_cursor(mode: &Mode) -> io::Result<()> {
    if matches!(mode, Mode::Editor { .. }) {
        execute!(stdout(), SetCursorStyle::BlinkingBar)
    } else {
        execute!(stdout(), SetCursorStyle::DefaultUserShape)
    }
}

/// Run the interactive session until the user quits.
pub fn launch(config: ResolvedConfig) -> io::Result<()> {
    let mut collab = Collaborators::from_config(&config);
    let mut session = Session::new(collab.themes.load());
    let mut tui = TuiState::default();

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let size = terminal.size()?;
        session.viewport = (size.width, size.height);
        run_loop(&mut terminal, &mut session, &mut collab, &mut tui)
    });
    ratatui::restore();
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    session: &mut Session,
    collab: &mut Collaborators,
    tui: &mut TuiState,
) -> io::Result<()> {
    let mut needs_redraw = true;
    let mut last_minute = collab.now().minute();
    let mut last_mode = session.mode.clone();

    loop {
        if needs_redraw {
            let now = collab.now();
            last_minute = now.minute();
            terminal.draw(|f| ui::draw_ui(f, session, tui, now))?;
            needs_redraw = false;

            if let Some(limit) = tui.viewer_measured.take()
                && limit != session.viewer_max_scroll
            {
                update(session, collab, Action::ViewerMeasured(limit));
            }
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT)?;
        if first_event.is_none() {
            // Timeouts only matter for the status bar clock
            needs_redraw = collab.now().minute() != last_minute;
            continue;
        }
        needs_redraw = true;

        let mut pending = first_event;
        while let Some(event) = pending {
            if let Some(action) = keymap::map_event(&session.mode, &event) {
                match update(session, collab, action) {
                    Effect::Quit => {
                        info!("Session ended");
                        return Ok(());
                    }
                    Effect::FocusEditor => {
                        tui.editor_scroll = EditorScroll::default();
                    }
                    Effect::None => {}
                }
            }
            pending = poll_event_immediate()?;
        }

        if session.mode != last_mode {
            debug!("Mode changed: {:?} -> {:?}", last_mode, session.mode);
            focus_cursor(&session.mode)?;
            last_mode = session.mode.clone();
        }
    }
}
