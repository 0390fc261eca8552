//! Default locations for everything NoteType keeps on disk.
//!
//! Everything lives under `~/.notetype/`. When the home directory cannot be
//! resolved each location falls back to a path relative to the working
//! directory, so the app still runs (just less tidily).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns `~/.notetype`, or `None` when there is no home directory.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".notetype"))
}

pub fn default_journal_dir() -> PathBuf {
    app_dir()
        .map(|d| d.join("journal"))
        .unwrap_or_else(|| PathBuf::from("./journal"))
}

pub fn default_templates_dir() -> PathBuf {
    app_dir()
        .map(|d| d.join("templates"))
        .unwrap_or_else(|| PathBuf::from("./templates"))
}

pub fn default_theme_file() -> PathBuf {
    app_dir()
        .map(|d| d.join("theme.json"))
        .unwrap_or_else(|| PathBuf::from(".notetype-theme.json"))
}

pub fn default_log_file() -> PathBuf {
    app_dir()
        .map(|d| d.join("notetype.log"))
        .unwrap_or_else(|| PathBuf::from("notetype.log"))
}

/// Create `dir` (and parents) if missing. Safe to call repeatedly.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
