//! Key bindings: the only place that decides what a key means.
//!
//! Two keymaps exist. While the editor is open, printable keys are text and
//! only chords and named keys carry commands. Everywhere else single letters
//! are shortcuts (`q`, `?`, `n`, `d`, `e`, `/`, `j`, `k`).

use crate::core::action::Action;
use crate::core::state::Mode;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Maps terminal events to core actions for one mode.
pub struct KeyMap<'a> {
    mode: &'a Mode,
}

impl<'a> KeyMap<'a> {
    pub fn new(mode: &'a Mode) -> Self {
        Self { mode }
    }
}

impl EventHandler for KeyMap<'_> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        // Bindings shared by every mode
        match event {
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::Escape => return Some(Action::Back),
            TuiEvent::Help => return Some(Action::ToggleHelp),
            TuiEvent::Resize(w, h) => return Some(Action::Resize(*w, *h)),
            _ => {}
        }

        if matches!(self.mode, Mode::Editor { .. }) {
            editing_binding(event)
        } else {
            browsing_binding(event)
        }
    }
}

fn editing_binding(event: &TuiEvent) -> Option<Action> {
    Some(match event {
        TuiEvent::Save => Action::Save,
        TuiEvent::InputChar(c) => Action::InsertChar(*c),
        TuiEvent::Submit => Action::InsertChar('\n'),
        TuiEvent::Paste(text) => Action::InsertText(text.clone()),
        TuiEvent::Backspace => Action::Backspace,
        TuiEvent::Delete => Action::DeleteForward,
        TuiEvent::CursorLeft => Action::CursorLeft,
        TuiEvent::CursorRight => Action::CursorRight,
        TuiEvent::CursorUp => Action::CursorUp,
        TuiEvent::CursorDown => Action::CursorDown,
        TuiEvent::WordLeft => Action::WordLeft,
        TuiEvent::WordRight => Action::WordRight,
        TuiEvent::Home => Action::CursorHome,
        TuiEvent::End => Action::CursorEnd,
        _ => return None,
    })
}

fn browsing_binding(event: &TuiEvent) -> Option<Action> {
    Some(match event {
        TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::InputChar('?') => Action::ToggleHelp,
        TuiEvent::InputChar('k') | TuiEvent::CursorUp => Action::MoveUp,
        TuiEvent::InputChar('j') | TuiEvent::CursorDown => Action::MoveDown,
        TuiEvent::InputChar('n') => Action::NewEntry,
        TuiEvent::InputChar('d') => Action::Delete,
        TuiEvent::InputChar('e') => Action::Edit,
        TuiEvent::InputChar('/') => Action::OpenSearch,
        TuiEvent::InputChar('g') | TuiEvent::Home => Action::Top,
        TuiEvent::InputChar('G') | TuiEvent::End => Action::Bottom,
        TuiEvent::Submit => Action::Select,
        TuiEvent::PageUp => Action::PageUp,
        TuiEvent::PageDown => Action::PageDown,
        _ => return None,
    })
}

/// Translate one event for `mode`.
pub fn map_event(mode: &Mode, event: &TuiEvent) -> Option<Action> {
    KeyMap::new(mode).handle_event(event)
}
