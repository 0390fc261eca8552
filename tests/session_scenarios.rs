//! End-to-end session scenarios against real files in a scratch directory.
//!
//! These drive `update()` the way the event loop does, with the filesystem
//! store, file-backed theme store and template engine wired in.

use std::fs;
use std::path::Path;

use chrono::Local;
use tempfile::TempDir;

use notetype::core::action::{Action, Collaborators, Effect, update};
use notetype::core::state::{ListItem, MenuAction, Mode, Session};
use notetype::core::store::{Collection, ContentStore, FsStore, journal_id};
use notetype::core::templates::TemplateEngine;
use notetype::core::theme::{FileThemeStore, ThemeStore, default_theme};

struct Fixture {
    dir: TempDir,
    session: Session,
    collab: Collaborators,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes");
        let journal = dir.path().join("journal");
        fs::create_dir_all(&notes).unwrap();
        let collab = Collaborators {
            store: Box::new(FsStore::new(&notes, &journal)),
            themes: Box::new(FileThemeStore::new(dir.path().join("theme.json"))),
            templates: TemplateEngine::new(Some(dir.path().join("templates"))),
            clock: Local::now,
            default_title: "New Entry".to_string(),
        };
        let mut session = Session::new(collab.themes.load());
        session.viewport = (80, 24);
        Self {
            dir,
            session,
            collab,
        }
    }

    fn notes_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("notes")
    }

    fn write_note(&self, id: &str, content: &str) {
        fs::write(self.notes_dir().join(format!("{}.md", id)), content).unwrap();
    }

    fn send(&mut self, action: Action) -> Effect {
        update(&mut self.session, &mut self.collab, action)
    }

    fn choose_menu(&mut self, choice: MenuAction) -> Effect {
        let index = MenuAction::ALL.iter().position(|a| *a == choice).unwrap();
        self.session.list.select(index);
        self.send(Action::Select)
    }

    /// Move the cursor onto the row whose identity is `value`.
    fn select_row(&mut self, value: &str) {
        let index = self
            .session
            .list
            .items()
            .iter()
            .position(|item| item.filter_value() == value)
            .unwrap_or_else(|| panic!("no row {:?}", value));
        self.session.list.select(index);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Action::InsertChar(c));
        }
    }

    fn row_ids(&self) -> Vec<String> {
        self.session
            .list
            .items()
            .iter()
            .filter_map(|item| match item {
                ListItem::Note(entry) => Some(entry.id.clone()),
                _ => None,
            })
            .collect()
    }
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[test]
fn test_todays_journal_is_written_and_saved() {
    let mut fx = Fixture::new();

    let effect = fx.choose_menu(MenuAction::TodayJournal);
    assert_eq!(effect, Effect::FocusEditor);
    assert_eq!(fx.session.mode, Mode::Editor { journal: true });
    assert!(fx.session.editor.text().is_empty());

    fx.type_text("Hello");
    fx.send(Action::Save);

    assert_eq!(fx.session.mode, Mode::Editor { journal: true });
    assert!(fx.session.status_message.contains("saved"));
    let id = journal_id(Local::now().date_naive());
    let saved = fx.collab.store.read(Collection::Journal, &id).unwrap();
    assert!(saved.contains("Hello"));
}

#[test]
fn test_saved_bytes_read_back_exactly() {
    let mut fx = Fixture::new();
    fx.choose_menu(MenuAction::NewNote);
    fx.send(Action::InsertText("line one\r\nline two\n\n  indented".to_string()));
    fx.send(Action::Save);

    let id = fx.session.current_item_id.clone().unwrap();
    let on_disk = fx.collab.store.read(Collection::Notes, &id).unwrap();
    assert_eq!(on_disk, fx.session.editor.text());
    assert_eq!(on_disk, "line one\nline two\n\n  indented");
}

#[test]
fn test_deleting_the_middle_note_reloads_the_list() {
    let mut fx = Fixture::new();
    for id in ["a", "b", "c"] {
        fx.write_note(id, &format!("# {}", id));
    }

    fx.choose_menu(MenuAction::Notes);
    assert_eq!(fx.row_ids(), vec!["a", "b", "c"]);
    fx.select_row("b");

    fx.send(Action::Delete);

    assert!(!exists(&fx.notes_dir().join("b.md")));
    assert_eq!(fx.row_ids(), vec!["a", "c"]);
    assert!(fx.session.list.cursor() < fx.session.list.len());
}

#[test]
fn test_deleting_the_last_note_leaves_an_empty_list() {
    let mut fx = Fixture::new();
    fx.write_note("only", "x");
    fx.choose_menu(MenuAction::Notes);

    fx.send(Action::Delete);

    assert!(fx.session.list.is_empty());
    assert_eq!(fx.session.list.cursor(), 0);
    // Nothing selected: a second delete does nothing
    assert_eq!(fx.send(Action::Delete), Effect::None);
}

#[test]
fn test_meeting_template_fills_in_today() {
    let mut fx = Fixture::new();
    fx.choose_menu(MenuAction::Templates);
    assert_eq!(fx.session.mode, Mode::Templates);
    fx.select_row("meeting");

    let effect = fx.send(Action::Select);

    assert_eq!(effect, Effect::FocusEditor);
    assert_eq!(fx.session.mode, Mode::Editor { journal: false });
    assert_eq!(fx.session.current_item_id, None);
    let body = fx.session.editor.text();
    assert!(body.contains(&Local::now().format("%Y-%m-%d").to_string()));
    for var in ["{{date}}", "{{time}}", "{{datetime}}", "{{title}}", "{{day}}"] {
        assert!(!body.contains(var), "{} left unexpanded", var);
    }
}

#[test]
fn test_choosing_a_tag_lists_only_matching_files() {
    let mut fx = Fixture::new();
    fx.write_note("standup", "# Standup\n#work #daily");
    fx.write_note("launch", "Plan the #Work launch");
    fx.write_note("garden", "Tomatoes #home");

    fx.choose_menu(MenuAction::Tags);
    assert_eq!(fx.session.mode, Mode::Tags);
    // Most used tag first
    assert_eq!(fx.session.list.selected().unwrap().filter_value(), "work");
    fx.select_row("work");

    fx.send(Action::Select);

    assert_eq!(
        fx.session.mode,
        Mode::List {
            journal: false,
            tag_filter: Some("work".to_string()),
        }
    );
    let mut ids = fx.row_ids();
    ids.sort();
    assert_eq!(ids, vec!["launch", "standup"]);
}

#[test]
fn test_applied_theme_survives_a_restart() {
    let mut fx = Fixture::new();
    assert_eq!(fx.session.theme, default_theme());

    fx.choose_menu(MenuAction::Themes);
    fx.select_row("nord");
    fx.send(Action::Select);

    assert_eq!(fx.session.mode, Mode::Menu);
    assert_eq!(fx.session.theme.key, "nord");

    let reopened = FileThemeStore::new(fx.dir.path().join("theme.json"));
    assert_eq!(reopened.load().key, "nord");
    assert_eq!(reopened.load(), reopened.load());
}

#[test]
fn test_corrupt_theme_file_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(&path, "{ not json").unwrap();

    let store = FileThemeStore::new(&path);
    assert_eq!(store.load(), default_theme());
    assert_eq!(store.load(), store.load());
}

#[test]
fn test_viewer_edit_and_back_round_trip() {
    let mut fx = Fixture::new();
    fx.write_note("ideas", "# Ideas\nfirst");

    fx.choose_menu(MenuAction::Notes);
    fx.send(Action::Select);
    assert_eq!(fx.session.mode, Mode::Viewer { journal: false });
    assert_eq!(fx.session.viewer_buffer, "# Ideas\nfirst");

    fx.send(Action::Edit);
    assert_eq!(fx.session.mode, Mode::Editor { journal: false });
    fx.send(Action::CursorEnd);
    fx.type_text(" and second");
    fx.send(Action::Save);

    fx.send(Action::Back);
    assert_eq!(fx.session.mode, Mode::Menu);
    assert_eq!(fx.session.current_item_id, None);
    assert_eq!(
        fs::read_to_string(fx.notes_dir().join("ideas.md")).unwrap(),
        "# Ideas\nfirst and second"
    );
}
