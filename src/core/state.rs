//! # Session State
//!
//! Everything the interactive session knows, in one place. This module holds
//! domain state only: no ratatui types. Presentation (colours, layout) is
//! derived from it by the `tui` module on every frame.
//!
//! ```text
//! Session
//! ├── mode: Mode                    // which view is active
//! ├── viewport: (u16, u16)          // last known terminal size
//! ├── current_item_id: Option<..>   // open note / journal entry
//! ├── editor: EditorBuffer          // working copy being edited
//! ├── viewer_buffer: String         // read-only content being viewed
//! ├── viewer_scroll: u16            // first visible viewer line
//! ├── viewer_max_scroll: u16        // last valid viewer_scroll, as measured
//! ├── status_message: String        // status bar text
//! ├── help_visible: bool            // full shortcut reference shown
//! ├── list: SelectList              // the one active list + cursor
//! ├── theme: Theme                  // active palette
//! └── should_quit: bool
//! ```
//!
//! State changes only happen through `update(session, collaborators, action)`
//! in action.rs.

use crate::core::editor::EditorBuffer;
use crate::core::store::{ListEntry, format_size};
use crate::core::templates::TemplateInfo;
use crate::core::theme::{THEMES, Theme};

pub const WELCOME_MESSAGE: &str = "Welcome to NoteType! Press ? for help";

/// Top-level view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Menu,
    List {
        journal: bool,
        tag_filter: Option<String>,
    },
    Editor {
        journal: bool,
    },
    Viewer {
        journal: bool,
    },
    Tags,
    Templates,
    Themes,
    /// Accepted as a view; no query is performed.
    Search,
}

impl Mode {
    /// Status bar label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Menu => "📋 Menu",
            Mode::List { .. } => "📚 List",
            Mode::Editor { .. } => "✏️  Editor",
            Mode::Viewer { .. } => "👁️  Viewer",
            Mode::Tags => "🏷️  Tags",
            Mode::Templates => "📋 Templates",
            Mode::Themes => "🎨 Themes",
            Mode::Search => "🔍 Search",
        }
    }

    /// Modes whose content panel is the selectable list.
    pub fn shows_list(&self) -> bool {
        matches!(
            self,
            Mode::Menu | Mode::List { .. } | Mode::Tags | Mode::Templates | Mode::Themes
        )
    }

    /// Heading drawn above the list in list-like modes.
    pub fn list_title(&self) -> String {
        match self {
            Mode::Menu => "NoteType - Main Menu".to_string(),
            Mode::List {
                tag_filter: Some(tag),
                ..
            } => format!("📄 Entries tagged with #{}", tag),
            Mode::List { journal: true, .. } => "📚 Journal Entries".to_string(),
            Mode::List { journal: false, .. } => "📝 Notes".to_string(),
            Mode::Tags => "🏷️  All Tags - Press Enter to filter".to_string(),
            Mode::Templates => "📋 Templates - Press Enter to use".to_string(),
            Mode::Themes => "🎨 Themes - Press Enter to apply".to_string(),
            Mode::Editor { .. } | Mode::Viewer { .. } | Mode::Search => String::new(),
        }
    }
}

/// What a main-menu entry does when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TodayJournal,
    AllJournals,
    Notes,
    NewNote,
    Templates,
    Tags,
    Search,
    Themes,
    Export,
    Settings,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::TodayJournal,
        MenuAction::AllJournals,
        MenuAction::Notes,
        MenuAction::NewNote,
        MenuAction::Templates,
        MenuAction::Tags,
        MenuAction::Search,
        MenuAction::Themes,
        MenuAction::Export,
        MenuAction::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::TodayJournal => "Today's Journal",
            MenuAction::AllJournals => "All Journals",
            MenuAction::Notes => "Notes",
            MenuAction::NewNote => "New Note",
            MenuAction::Templates => "Templates",
            MenuAction::Tags => "Tags",
            MenuAction::Search => "Search",
            MenuAction::Themes => "Themes",
            MenuAction::Export => "Export",
            MenuAction::Settings => "Settings",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            MenuAction::TodayJournal => "📔",
            MenuAction::AllJournals => "📚",
            MenuAction::Notes => "📝",
            MenuAction::NewNote => "✨",
            MenuAction::Templates => "📋",
            MenuAction::Tags => "🏷️",
            MenuAction::Search => "🔍",
            MenuAction::Themes => "🎨",
            MenuAction::Export => "📤",
            MenuAction::Settings => "⚙️",
        }
    }

    fn description(self) -> &'static str {
        match self {
            MenuAction::TodayJournal => "Write or view today's journal entry",
            MenuAction::AllJournals => "Browse all your journal entries",
            MenuAction::Notes => "Manage your notes",
            MenuAction::NewNote => "Create a new note",
            MenuAction::Templates => "Create from template",
            MenuAction::Tags => "Browse notes by tags",
            MenuAction::Search => "Search across all entries",
            MenuAction::Themes => "Change TUI appearance",
            MenuAction::Export => "Export to PDF/HTML",
            MenuAction::Settings => "Configure NoteType",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub current: bool,
}

/// One row of the active list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Menu(MenuAction),
    Note(ListEntry),
    Tag(TagEntry),
    Template(TemplateInfo),
    Theme(ThemeEntry),
}

impl ListItem {
    pub fn title(&self) -> String {
        match self {
            ListItem::Menu(action) => format!("{} {}", action.icon(), action.label()),
            ListItem::Note(entry) => format!("📄 {}", entry.display_title),
            ListItem::Tag(t) => format!("🏷️  #{}", t.tag),
            ListItem::Template(t) => format!("📋 {}", t.name),
            ListItem::Theme(t) if t.current => format!("✓ 🎨 {}", t.name),
            ListItem::Theme(t) => format!("  🎨 {}", t.name),
        }
    }

    pub fn description(&self) -> String {
        match self {
            ListItem::Menu(action) => action.description().to_string(),
            ListItem::Note(entry) => format!(
                "{} • {}",
                entry.last_modified.format("%b %-d, %Y %H:%M"),
                format_size(entry.size_bytes)
            ),
            ListItem::Tag(t) => format!("{} entries", t.count),
            ListItem::Template(t) => t.description.clone(),
            ListItem::Theme(_) => "Press Enter to apply".to_string(),
        }
    }

    /// Identity used when matching or filtering rows.
    pub fn filter_value(&self) -> &str {
        match self {
            ListItem::Menu(action) => action.label(),
            ListItem::Note(entry) => &entry.display_title,
            ListItem::Tag(t) => &t.tag,
            ListItem::Template(t) => &t.name,
            ListItem::Theme(t) => t.key,
        }
    }
}

/// The active list and its selection cursor.
///
/// The cursor is always within `[0, len)` for a non-empty list and 0 for
/// an empty one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectList {
    items: Vec<ListItem>,
    cursor: usize,
}

impl SelectList {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn menu() -> Self {
        Self::new(MenuAction::ALL.iter().copied().map(ListItem::Menu).collect())
    }

    pub fn themes(current: &Theme) -> Self {
        let items: Vec<ListItem> = THEMES
            .iter()
            .map(|t| {
                ListItem::Theme(ThemeEntry {
                    key: t.key,
                    name: t.name,
                    current: t.key == current.key,
                })
            })
            .collect();
        let cursor = items
            .iter()
            .position(|i| matches!(i, ListItem::Theme(t) if t.current))
            .unwrap_or(0);
        Self { items, cursor }
    }

    /// Swap in fresh items, keeping the cursor position where it still fits.
    pub fn replace(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.clamp();
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&ListItem> {
        self.items.get(self.cursor)
    }

    pub fn select(&mut self, index: usize) {
        self.cursor = index;
        self.clamp();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.select(self.cursor + 1);
    }

    pub fn page_up(&mut self, page: usize) {
        self.cursor = self.cursor.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        self.select(self.cursor.saturating_add(page.max(1)));
    }

    pub fn top(&mut self) {
        self.cursor = 0;
    }

    pub fn bottom(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    fn clamp(&mut self) {
        if self.items.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.items.len() {
            self.cursor = self.items.len() - 1;
        }
    }
}

pub struct Session {
    pub mode: Mode,
    /// (width, height) of the terminal
    pub viewport: (u16, u16),
    /// Set only in Editor/Viewer with a loaded or being-created item.
    pub current_item_id: Option<String>,
    pub editor: EditorBuffer,
    pub viewer_buffer: String,
    pub viewer_scroll: u16,
    /// Largest useful `viewer_scroll` for the rendered body. `u16::MAX`
    /// until the renderer has measured the current content at the current
    /// size.
    pub viewer_max_scroll: u16,
    pub status_message: String,
    pub help_visible: bool,
    pub list: SelectList,
    pub theme: Theme,
    pub should_quit: bool,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        Self {
            mode: Mode::Menu,
            viewport: (0, 0),
            current_item_id: None,
            editor: EditorBuffer::new(),
            viewer_buffer: String::new(),
            viewer_scroll: 0,
            viewer_max_scroll: u16::MAX,
            status_message: String::from(WELCOME_MESSAGE),
            help_visible: false,
            list: SelectList::menu(),
            theme,
            should_quit: false,
        }
    }

    /// Rows available to a list or viewer page (title, status, help and
    /// borders excluded).
    pub fn page_size(&self) -> usize {
        usize::from(self.viewport.1.saturating_sub(8)).max(1)
    }
}
