//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};

use crate::core::action::Collaborators;
use crate::core::error::StoreError;
use crate::core::store::{Collection, ContentStore, ListEntry, journal_id};
use crate::core::templates::TemplateEngine;
use crate::core::theme::{Theme, ThemeStore, default_theme, find_theme};

/// Friday 2025-03-07 09:05 local time.
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap()
}

pub fn today_id() -> String {
    journal_id(fixed_now().date_naive())
}

/// In-memory content store with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<(bool, String), String>>,
    fail_deletes: Cell<bool>,
    fail_lists: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: Collection, id: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert((collection.is_journal(), id.to_string()), content.to_string());
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.set(true);
    }

    pub fn fail_lists(&self) {
        self.fail_lists.set(true);
    }

    fn key(collection: Collection, id: &str) -> (bool, String) {
        (collection.is_journal(), id.to_string())
    }

    fn make_entry(collection: Collection, id: &str, content: &str) -> ListEntry {
        ListEntry {
            id: id.to_string(),
            display_title: id.to_string(),
            last_modified: fixed_now(),
            size_bytes: content.len() as u64,
            collection,
        }
    }
}

impl ContentStore for MemoryStore {
    fn list(&self, collection: Collection) -> Result<Vec<ListEntry>, StoreError> {
        if self.fail_lists.get() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "listing disabled",
            )));
        }
        let files = self.files.borrow();
        let mut entries: Vec<ListEntry> = files
            .iter()
            .filter(|((journal, _), _)| *journal == collection.is_journal())
            .map(|((_, id), content)| Self::make_entry(collection, id, content))
            .collect();
        if collection.is_journal() {
            entries.reverse();
        }
        Ok(entries)
    }

    fn read(&self, collection: Collection, id: &str) -> Result<String, StoreError> {
        self.files
            .borrow()
            .get(&Self::key(collection, id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn write(&self, collection: Collection, id: &str, content: &str) -> Result<(), StoreError> {
        self.insert(collection, id, content);
        Ok(())
    }

    fn append(&self, collection: Collection, id: &str, text: &str) -> Result<(), StoreError> {
        let mut files = self.files.borrow_mut();
        let content = files
            .get_mut(&Self::key(collection, id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        content.push_str("\n\n");
        content.push_str(text);
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        if self.fail_deletes.get() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        self.files
            .borrow_mut()
            .remove(&Self::key(collection, id))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn exists(&self, collection: Collection, id: &str) -> bool {
        self.files.borrow().contains_key(&Self::key(collection, id))
    }

    fn location(&self, collection: Collection) -> PathBuf {
        PathBuf::from(if collection.is_journal() {
            "memory/journal"
        } else {
            "memory/notes"
        })
    }
}

/// Theme store that remembers the last saved key.
#[derive(Default)]
pub struct MemoryThemeStore {
    saved: RefCell<Option<&'static str>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Theme {
        self.saved
            .borrow()
            .and_then(find_theme)
            .unwrap_or_else(default_theme)
    }

    fn save(&self, key: &str) -> Result<Theme, StoreError> {
        let theme = find_theme(key).ok_or_else(|| {
            StoreError::Io(io::Error::new(io::ErrorKind::InvalidInput, "unknown theme"))
        })?;
        *self.saved.borrow_mut() = Some(theme.key);
        Ok(theme)
    }
}

/// Collaborators over `store`, an in-memory theme store, built-in templates
/// only, and a clock frozen at `fixed_now()`.
pub fn test_collaborators(store: MemoryStore) -> Collaborators {
    Collaborators {
        store: Box::new(store),
        themes: Box::new(MemoryThemeStore::default()),
        templates: TemplateEngine::builtin_only(),
        clock: fixed_now,
        default_title: "New Entry".to_string(),
    }
}
