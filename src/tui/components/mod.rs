//! # TUI Components
//!
//! Every region of the screen is a component implementing
//! [`Component`](crate::tui::component::Component).
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ TitleBar                                 │  1 row
//! ├──────────────────────────────────────────┤
//! │ ItemList | EditorPanel | Viewer | search │  fills
//! ├──────────────────────────────────────────┤
//! │ StatusBar                                │  1 row
//! │ HelpPanel                                │  1 row, or the full reference
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Props-Based Data Flow
//!
//! Components receive what they draw as struct fields, mostly borrowed from
//! `Session`, plus a `Palette` derived from the active theme. None of them
//! reach into global state, so each can be rendered alone on a
//! `TestBackend`.
//!
//! The one piece of state that outlives a frame is the editor's scroll
//! offset (`EditorScroll`), owned by the event loop and lent to
//! `EditorPanel` on each draw.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod editor_panel;
mod help_panel;
mod item_list;
mod status_bar;
mod title_bar;
mod viewer;

pub use editor_panel::{EditorPanel, EditorScroll};
pub use help_panel::HelpPanel;
pub use item_list::ItemList;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
pub use viewer::Viewer;

/// Cut `s` to at most `max_width` display columns, ending in `…` when
/// anything was dropped.
pub(crate) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
