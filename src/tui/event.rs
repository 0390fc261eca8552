use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal input, decoded from crossterm but not yet interpreted.
///
/// What an event means depends on the active mode; `keymap` decides that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C, quits from every mode
    ForceQuit,
    Escape,
    Submit,
    InputChar(char),
    /// Bracketed paste, newlines preserved
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    WordLeft,
    WordRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Ctrl+S
    Save,
    /// F1, toggles help even while typing
    Help,
    Resize(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Wait up to `timeout` for the next event. Events that mean nothing to the
/// session (mouse, focus, key releases) come back as `None`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => translate_key(key_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    })
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::ForceQuit),
        KeyCode::Char('s') if ctrl => Some(TuiEvent::Save),
        // Ctrl+J is a bare line feed in most terminals
        KeyCode::Char('j') if ctrl => Some(TuiEvent::InputChar('\n')),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Tab => Some(TuiEvent::InputChar('\t')),
        KeyCode::Left if ctrl => Some(TuiEvent::WordLeft),
        KeyCode::Right if ctrl => Some(TuiEvent::WordRight),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::Home),
        KeyCode::End => Some(TuiEvent::End),
        KeyCode::PageUp => Some(TuiEvent::PageUp),
        KeyCode::PageDown => Some(TuiEvent::PageDown),
        KeyCode::F(1) => Some(TuiEvent::Help),
        _ => None,
    }
}
