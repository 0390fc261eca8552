//! # Content Store
//!
//! Markdown files in two collections:
//!
//! - **Notes**: `*.md` directly inside the notes directory (the working
//!   directory unless configured otherwise). Ids are caller-chosen names.
//! - **Journal**: `YYYY-MM-DD.md` inside the journal directory.
//!
//! Ids never include the `.md` suffix; the store appends it. There is no
//! cache: every `list`/`read` goes back to disk, so edits made outside the
//! app show up the next time a view is loaded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use log::{debug, info};

use crate::core::error::{StoreError, classify};
use crate::core::paths;

pub const EXTENSION: &str = "md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notes,
    Journal,
}

impl Collection {
    pub fn from_journal_flag(journal: bool) -> Self {
        if journal {
            Collection::Journal
        } else {
            Collection::Notes
        }
    }

    pub fn is_journal(self) -> bool {
        matches!(self, Collection::Journal)
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Notes => "note",
            Collection::Journal => "journal entry",
        }
    }
}

/// One file in a collection, as shown in a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub display_title: String,
    pub last_modified: DateTime<Local>,
    pub size_bytes: u64,
    pub collection: Collection,
}

/// Everything the session needs from the file store.
pub trait ContentStore {
    fn list(&self, collection: Collection) -> Result<Vec<ListEntry>, StoreError>;
    fn read(&self, collection: Collection, id: &str) -> Result<String, StoreError>;
    fn write(&self, collection: Collection, id: &str, content: &str) -> Result<(), StoreError>;
    fn append(&self, collection: Collection, id: &str, text: &str) -> Result<(), StoreError>;
    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
    fn exists(&self, collection: Collection, id: &str) -> bool;
    /// Directory backing a collection (for user-facing messages).
    fn location(&self, collection: Collection) -> PathBuf;
}

/// Journal id for a calendar day: `YYYY-MM-DD`.
pub fn journal_id(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Fresh note id derived from the clock: `note-<unix seconds>`.
pub fn new_note_id(now: DateTime<Local>) -> String {
    format!("note-{}", now.timestamp())
}

/// Human-readable byte count ("512 B", "1.5 KB").
pub fn format_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    if size < UNIT {
        return format!("{} B", size);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", size as f64 / div as f64, suffix)
}

/// Filesystem-backed store.
pub struct FsStore {
    notes_dir: PathBuf,
    journal_dir: PathBuf,
}

impl FsStore {
    pub fn new(notes_dir: impl Into<PathBuf>, journal_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            journal_dir: journal_dir.into(),
        }
    }

    fn dir(&self, collection: Collection) -> &Path {
        match collection {
            Collection::Notes => &self.notes_dir,
            Collection::Journal => &self.journal_dir,
        }
    }

    fn path(&self, collection: Collection, id: &str) -> PathBuf {
        self.dir(collection).join(format!("{}.{}", id, EXTENSION))
    }

    fn entry_for_path(&self, collection: Collection, path: &Path) -> Option<ListEntry> {
        let id = path.file_stem()?.to_str()?.to_string();
        let meta = fs::metadata(path).ok()?;
        let last_modified = meta
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        Some(ListEntry {
            display_title: id.clone(),
            id,
            last_modified,
            size_bytes: meta.len(),
            collection,
        })
    }
}

impl ContentStore for FsStore {
    fn list(&self, collection: Collection) -> Result<Vec<ListEntry>, StoreError> {
        let dir = self.dir(collection);
        if collection.is_journal() && !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<ListEntry> = fs::read_dir(dir)?
            .filter_map(|res| res.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|p| self.entry_for_path(collection, &p))
            .collect();

        match collection {
            Collection::Journal => entries.sort_by(|a, b| b.id.cmp(&a.id)),
            Collection::Notes => entries.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        debug!("Listed {} {:?} entries in {}", entries.len(), collection, dir.display());
        Ok(entries)
    }

    fn read(&self, collection: Collection, id: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.path(collection, id)).map_err(|e| classify(e, id))
    }

    fn write(&self, collection: Collection, id: &str, content: &str) -> Result<(), StoreError> {
        if collection.is_journal() {
            paths::ensure_dir(&self.journal_dir)?;
        }
        let path = self.path(collection, id);
        fs::write(&path, content)?;
        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn append(&self, collection: Collection, id: &str, text: &str) -> Result<(), StoreError> {
        let path = self.path(collection, id);
        // No `create`: a missing target is an error, never a fresh file.
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| classify(e, id))?;
        file.write_all(format!("\n\n{}", text).as_bytes())?;
        info!("Appended {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let path = self.path(collection, id);
        fs::remove_file(&path).map_err(|e| classify(e, id))?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    fn exists(&self, collection: Collection, id: &str) -> bool {
        self.path(collection, id).is_file()
    }

    fn location(&self, collection: Collection) -> PathBuf {
        self.dir(collection).to_path_buf()
    }
}
