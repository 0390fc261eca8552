//! # Actions
//!
//! Everything that can happen in NoteType becomes an `Action`.
//! User presses Enter on a list? That's `Action::Select`.
//! User presses Ctrl+S in the editor? That's `Action::Save`.
//!
//! The `update()` function takes the session and an action, mutates the
//! session, and returns an `Effect` for the event loop. File access only
//! happens through the collaborator traits in `Collaborators`, so every
//! transition can be driven in tests with fakes or a temp directory.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! No error escapes a transition: failures become the status message and
//! the mode stays put (or falls back to the menu when a list can't load).

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::editor::EditorBuffer;
use crate::core::error::StoreError;
use crate::core::state::{ListItem, MenuAction, Mode, SelectList, Session, TagEntry};
use crate::core::store::{Collection, ContentStore, FsStore, ListEntry, journal_id, new_note_id};
use crate::core::tags;
use crate::core::templates::{TemplateEngine, template_variables};
use crate::core::theme::{FileThemeStore, ThemeStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    ToggleHelp,
    Back,
    Resize(u16, u16),
    /// The renderer measured the viewer body: the largest scroll offset
    /// that still fills the panel.
    ViewerMeasured(u16),

    // Navigation (list cursor, or viewer scroll)
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Top,
    Bottom,

    // Mode commands
    Select,
    NewEntry,
    Delete,
    Edit,
    Save,
    OpenSearch,

    // Editor text
    InsertChar(char),
    InsertText(String),
    Backspace,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    WordLeft,
    WordRight,
}

/// Follow-up work for the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// The editor just gained focus (show a blinking bar cursor).
    FocusEditor,
}

/// The four collaborators the session orchestrates, plus the clock.
pub struct Collaborators {
    pub store: Box<dyn ContentStore>,
    pub themes: Box<dyn ThemeStore>,
    pub templates: TemplateEngine,
    pub clock: fn() -> DateTime<Local>,
    /// `{{title}}` for templates opened from the session.
    pub default_title: String,
}

impl Collaborators {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            store: Box::new(FsStore::new(&config.notes_dir, &config.journal_dir)),
            themes: Box::new(FileThemeStore::new(&config.theme_file)),
            templates: TemplateEngine::new(Some(config.templates_dir.clone())),
            clock: Local::now,
            default_title: config.default_title.clone(),
        }
    }

    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }
}

pub fn update(session: &mut Session, collab: &mut Collaborators, action: Action) -> Effect {
    debug!("update: {:?} in {:?}", action, session.mode);

    // Global actions first
    match action {
        Action::Quit => {
            session.should_quit = true;
            return Effect::Quit;
        }
        Action::ToggleHelp => {
            session.help_visible = !session.help_visible;
            return Effect::None;
        }
        Action::Back => {
            if session.mode != Mode::Menu {
                go_to_menu(session);
                session.status_message = "Returned to main menu".to_string();
            }
            return Effect::None;
        }
        Action::Resize(width, height) => {
            session.viewport = (width, height);
            // Wrapping changes with the width; wait for a new measurement
            session.viewer_max_scroll = u16::MAX;
            return Effect::None;
        }
        _ => {}
    }

    match session.mode.clone() {
        Mode::Menu => match action {
            Action::Select => match session.list.selected() {
                Some(ListItem::Menu(choice)) => {
                    let choice = *choice;
                    select_menu(session, collab, choice)
                }
                _ => Effect::None,
            },
            Action::OpenSearch => open_search(session),
            other => {
                navigate_list(session, &other);
                Effect::None
            }
        },
        Mode::List {
            journal,
            tag_filter,
        } => match action {
            Action::Select => open_selected(session, collab),
            Action::NewEntry => new_entry(session, collab, journal),
            Action::Delete => delete_selected(session, collab, journal, tag_filter),
            Action::OpenSearch => open_search(session),
            other => {
                navigate_list(session, &other);
                Effect::None
            }
        },
        Mode::Editor { journal } => edit_buffer(session, collab, journal, action),
        Mode::Viewer { journal } => match action {
            Action::Edit => edit_current(session, collab, journal),
            other => {
                scroll_viewer(session, &other);
                Effect::None
            }
        },
        Mode::Tags => match action {
            Action::Select => match session.list.selected() {
                Some(ListItem::Tag(TagEntry { tag, .. })) => {
                    let tag = tag.clone();
                    show_entries_with_tag(session, collab, &tag)
                }
                _ => Effect::None,
            },
            Action::OpenSearch => open_search(session),
            other => {
                navigate_list(session, &other);
                Effect::None
            }
        },
        Mode::Templates => match action {
            Action::Select => match session.list.selected() {
                Some(ListItem::Template(t)) => {
                    let name = t.name.clone();
                    create_from_template(session, collab, &name)
                }
                _ => Effect::None,
            },
            Action::OpenSearch => open_search(session),
            other => {
                navigate_list(session, &other);
                Effect::None
            }
        },
        Mode::Themes => match action {
            Action::Select => match session.list.selected() {
                Some(ListItem::Theme(t)) => {
                    let key = t.key;
                    apply_theme(session, collab, key)
                }
                _ => Effect::None,
            },
            Action::OpenSearch => open_search(session),
            other => {
                navigate_list(session, &other);
                Effect::None
            }
        },
        Mode::Search => Effect::None,
    }
}

// ============================================================================
// Menu
// ============================================================================

fn select_menu(session: &mut Session, collab: &Collaborators, choice: MenuAction) -> Effect {
    info!("Menu selection: {}", choice.label());
    match choice {
        MenuAction::TodayJournal => open_today_journal(session, collab),
        MenuAction::AllJournals => {
            load_list(session, collab, true);
            Effect::None
        }
        MenuAction::Notes => {
            load_list(session, collab, false);
            Effect::None
        }
        MenuAction::NewNote => create_new_note(session),
        MenuAction::Templates => {
            load_templates(session, collab);
            Effect::None
        }
        MenuAction::Tags => {
            load_tags(session, collab);
            Effect::None
        }
        MenuAction::Search => open_search(session),
        MenuAction::Themes => {
            session.list = SelectList::themes(&session.theme);
            session.mode = Mode::Themes;
            session.status_message = "Select a theme and press Enter".to_string();
            Effect::None
        }
        MenuAction::Export => {
            session.status_message = "Export not yet implemented".to_string();
            Effect::None
        }
        MenuAction::Settings => {
            session.status_message = "Settings not yet implemented".to_string();
            Effect::None
        }
    }
}

fn go_to_menu(session: &mut Session) {
    session.mode = Mode::Menu;
    session.current_item_id = None;
    session.viewer_scroll = 0;
    session.viewer_max_scroll = u16::MAX;
    session.list = SelectList::menu();
}

fn open_search(session: &mut Session) -> Effect {
    session.mode = Mode::Search;
    session.current_item_id = None;
    session.status_message = "Search feature".to_string();
    Effect::None
}

// ============================================================================
// Lists
// ============================================================================

fn fetch_entries(
    collab: &Collaborators,
    journal: bool,
    tag_filter: Option<&str>,
) -> Result<Vec<ListEntry>, StoreError> {
    match tag_filter {
        Some(tag) => tags::find_by_tag(collab.store.as_ref(), tag),
        None => collab.store.list(Collection::from_journal_flag(journal)),
    }
}

fn note_items(entries: Vec<ListEntry>) -> Vec<ListItem> {
    entries.into_iter().map(ListItem::Note).collect()
}

/// Enter List mode for a whole collection. On failure fall back to the menu.
fn load_list(session: &mut Session, collab: &Collaborators, journal: bool) {
    let what = if journal { "journals" } else { "notes" };
    match fetch_entries(collab, journal, None) {
        Ok(entries) => {
            let count = entries.len();
            session.list = SelectList::new(note_items(entries));
            session.mode = Mode::List {
                journal,
                tag_filter: None,
            };
            session.current_item_id = None;
            session.status_message = if journal {
                format!("Found {} journal entries", count)
            } else {
                format!("Found {} notes", count)
            };
        }
        Err(e) => {
            warn!("Failed to load {}: {}", what, e);
            go_to_menu(session);
            session.status_message = format!("Error loading {}: {}", what, e);
        }
    }
}

fn open_selected(session: &mut Session, collab: &Collaborators) -> Effect {
    let Some(ListItem::Note(entry)) = session.list.selected() else {
        return Effect::None;
    };
    let (collection, id) = (entry.collection, entry.id.clone());

    match collab.store.read(collection, &id) {
        Ok(content) => {
            session.viewer_buffer = content;
            session.viewer_scroll = 0;
            session.viewer_max_scroll = u16::MAX;
            session.current_item_id = Some(id);
            session.mode = Mode::Viewer {
                journal: collection.is_journal(),
            };
            session.status_message = if collection.is_journal() {
                "Viewing journal entry - Press 'e' to edit".to_string()
            } else {
                "Viewing note - Press 'e' to edit".to_string()
            };
        }
        Err(e) => {
            warn!("Failed to open {}: {}", id, e);
            session.status_message = format!("Error opening {}: {}", collection.label(), e);
        }
    }
    Effect::None
}

fn new_entry(session: &mut Session, collab: &Collaborators, journal: bool) -> Effect {
    if journal {
        open_today_journal(session, collab)
    } else {
        create_new_note(session)
    }
}

fn delete_selected(
    session: &mut Session,
    collab: &Collaborators,
    journal: bool,
    tag_filter: Option<String>,
) -> Effect {
    let Some(ListItem::Note(entry)) = session.list.selected() else {
        return Effect::None;
    };
    let (collection, id) = (entry.collection, entry.id.clone());

    if let Err(e) = collab.store.delete(collection, &id) {
        warn!("Failed to delete {}: {}", id, e);
        session.status_message = format!("Error deleting: {}", e);
        return Effect::None;
    }
    info!("Deleted {} {}", collection.label(), id);

    match fetch_entries(collab, journal, tag_filter.as_deref()) {
        Ok(entries) => {
            session.list.replace(note_items(entries));
            session.status_message = "✅ Deleted successfully".to_string();
        }
        Err(e) => {
            warn!("Reload after delete failed: {}", e);
            go_to_menu(session);
            session.status_message = format!("Deleted, but reloading the list failed: {}", e);
        }
    }
    Effect::None
}

fn navigate_list(session: &mut Session, action: &Action) {
    let page = session.page_size();
    match action {
        Action::MoveUp => session.list.move_up(),
        Action::MoveDown => session.list.move_down(),
        Action::PageUp => session.list.page_up(page),
        Action::PageDown => session.list.page_down(page),
        Action::Top => session.list.top(),
        Action::Bottom => session.list.bottom(),
        _ => {}
    }
}

// ============================================================================
// Editor
// ============================================================================

fn open_today_journal(session: &mut Session, collab: &Collaborators) -> Effect {
    let id = journal_id(collab.now().date_naive());
    let content = match collab.store.read(Collection::Journal, &id) {
        Ok(content) => content,
        Err(StoreError::NotFound(_)) => String::new(),
        Err(e) => {
            warn!("Failed to read today's journal {}: {}", id, e);
            session.status_message = format!("Error opening journal: {}", e);
            return Effect::None;
        }
    };

    session.editor = EditorBuffer::with_text(content);
    session.current_item_id = Some(id);
    session.mode = Mode::Editor { journal: true };
    session.status_message = "Writing today's journal".to_string();
    Effect::FocusEditor
}

fn create_new_note(session: &mut Session) -> Effect {
    session.editor = EditorBuffer::new();
    session.current_item_id = None;
    session.mode = Mode::Editor { journal: false };
    session.status_message = "Creating new note".to_string();
    Effect::FocusEditor
}

fn edit_buffer(
    session: &mut Session,
    collab: &Collaborators,
    journal: bool,
    action: Action,
) -> Effect {
    if action == Action::Save {
        return save_current(session, collab, journal);
    }

    let editor = &mut session.editor;
    match action {
        Action::InsertChar(c) => editor.insert_char(c),
        Action::InsertText(text) => editor.insert_str(&text),
        Action::Backspace => editor.backspace(),
        Action::DeleteForward => editor.delete_forward(),
        Action::CursorLeft => editor.move_left(),
        Action::CursorRight => editor.move_right(),
        Action::CursorUp | Action::MoveUp => editor.move_up(),
        Action::CursorDown | Action::MoveDown => editor.move_down(),
        Action::CursorHome => editor.move_home(),
        Action::CursorEnd => editor.move_end(),
        Action::WordLeft => editor.move_word_left(),
        Action::WordRight => editor.move_word_right(),
        _ => {}
    }
    Effect::None
}

fn save_current(session: &mut Session, collab: &Collaborators, journal: bool) -> Effect {
    let collection = Collection::from_journal_flag(journal);
    let label = if journal { "journal" } else { "note" };

    let id = match &session.current_item_id {
        Some(id) => id.clone(),
        None if session.editor.is_blank() => {
            session.status_message = format!("Error saving {}: {}", label, StoreError::EmptyInput);
            return Effect::None;
        }
        None if journal => journal_id(collab.now().date_naive()),
        None => new_note_id(collab.now()),
    };

    match collab.store.write(collection, &id, session.editor.text()) {
        Ok(()) => {
            info!("Saved {} {}", label, id);
            session.current_item_id = Some(id);
            session.status_message = if journal {
                "✅ Journal saved successfully! Press Esc to go back".to_string()
            } else {
                "✅ Note saved successfully! Press Esc to go back".to_string()
            };
        }
        Err(e) => {
            warn!("Failed to save {}: {}", id, e);
            session.status_message = format!("Error saving {}: {}", label, e);
        }
    }
    Effect::None
}

// ============================================================================
// Viewer
// ============================================================================

fn edit_current(session: &mut Session, collab: &Collaborators, journal: bool) -> Effect {
    let Some(id) = session.current_item_id.clone() else {
        return Effect::None;
    };
    match collab
        .store
        .read(Collection::from_journal_flag(journal), &id)
    {
        Ok(content) => {
            session.editor = EditorBuffer::with_text(content);
            session.mode = Mode::Editor { journal };
            session.status_message = "Editing - Press Ctrl+S to save, Esc to cancel".to_string();
            Effect::FocusEditor
        }
        Err(e) => {
            warn!("Failed to reload {} for editing: {}", id, e);
            session.status_message = format!("Error loading file for editing: {}", e);
            Effect::None
        }
    }
}

fn scroll_viewer(session: &mut Session, action: &Action) {
    let page = u16::try_from(session.page_size()).unwrap_or(u16::MAX);
    let max = session.viewer_max_scroll;
    let scroll = &mut session.viewer_scroll;
    match action {
        Action::ViewerMeasured(measured) => {
            session.viewer_max_scroll = *measured;
            *scroll = (*scroll).min(*measured);
        }
        Action::MoveUp => *scroll = scroll.saturating_sub(1),
        Action::MoveDown => *scroll = scroll.saturating_add(1).min(max),
        Action::PageUp => *scroll = scroll.saturating_sub(page),
        Action::PageDown => *scroll = scroll.saturating_add(page).min(max),
        Action::Top => *scroll = 0,
        Action::Bottom => *scroll = max,
        _ => {}
    }
}

// ============================================================================
// Tags, templates, themes
// ============================================================================

fn load_tags(session: &mut Session, collab: &Collaborators) {
    let index = match tags::index_all(collab.store.as_ref()) {
        Ok(index) => index,
        Err(e) => {
            warn!("Failed to index tags: {}", e);
            session.status_message = format!("Error loading tags: {}", e);
            return;
        }
    };
    if index.is_empty() {
        session.status_message = "No tags found. Add #tags to your notes!".to_string();
        return;
    }

    let items: Vec<ListItem> = tags::sorted_counts(&index)
        .into_iter()
        .map(|(tag, count)| ListItem::Tag(TagEntry { tag, count }))
        .collect();
    session.status_message = format!("Found {} tags", items.len());
    session.list = SelectList::new(items);
    session.mode = Mode::Tags;
}

fn show_entries_with_tag(session: &mut Session, collab: &Collaborators, tag: &str) -> Effect {
    match tags::find_by_tag(collab.store.as_ref(), tag) {
        Ok(entries) if entries.is_empty() => {
            session.status_message = format!("No entries found with #{}", tag);
        }
        Ok(entries) => {
            session.status_message = format!("Found {} entries with #{}", entries.len(), tag);
            session.list = SelectList::new(note_items(entries));
            session.mode = Mode::List {
                journal: false,
                tag_filter: Some(tag.to_string()),
            };
        }
        Err(e) => {
            warn!("Failed to find files tagged {}: {}", tag, e);
            session.status_message = format!("Error finding files: {}", e);
        }
    }
    Effect::None
}

fn load_templates(session: &mut Session, collab: &Collaborators) {
    let items: Vec<ListItem> = collab
        .templates
        .list()
        .into_iter()
        .map(ListItem::Template)
        .collect();
    session.status_message = format!("{} templates available", items.len());
    session.list = SelectList::new(items);
    session.mode = Mode::Templates;
}

fn create_from_template(session: &mut Session, collab: &Collaborators, name: &str) -> Effect {
    let vars = template_variables(collab.now(), &collab.default_title);
    match collab.templates.render(name, &vars) {
        Ok(body) => {
            session.editor = EditorBuffer::with_text(body);
            session.current_item_id = None;
            session.mode = Mode::Editor { journal: false };
            session.status_message =
                format!("Using {} template - Edit and save with Ctrl+S", name);
            Effect::FocusEditor
        }
        Err(e) => {
            warn!("Failed to render template {}: {}", name, e);
            session.status_message = format!("Error loading template: {}", e);
            Effect::None
        }
    }
}

fn apply_theme(session: &mut Session, collab: &Collaborators, key: &str) -> Effect {
    match collab.themes.save(key) {
        Ok(theme) => {
            info!("Applied theme {}", theme.key);
            session.theme = theme;
            go_to_menu(session);
            session.status_message =
                format!("✅ Applied theme: {} - All UI elements updated!", theme.name);
        }
        Err(e) => {
            warn!("Failed to save theme {}: {}", key, e);
            session.status_message = format!("Error saving theme: {}", e);
        }
    }
    Effect::None
}
