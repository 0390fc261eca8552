//! # Themes
//!
//! A theme is a named palette of ten colour roles. The active theme is
//! persisted as its key (JSON-encoded string, e.g. `"dracula"`) in a single
//! file. Loading never fails: anything unexpected falls back to the default.
//!
//! Colours are kept as hex strings here; turning them into terminal styles
//! is the renderer's job.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::error::StoreError;
use crate::core::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub background: &'static str,
    pub background_alt: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

pub const DEFAULT_THEME_KEY: &str = "violet";

pub const THEMES: &[Theme] = &[
    Theme {
        key: "violet",
        name: "Violet (Default)",
        primary: "#7C3AED",
        secondary: "#8B5CF6",
        accent: "#A78BFA",
        success: "#10B981",
        warning: "#F59E0B",
        error: "#EF4444",
        text: "#E5E7EB",
        muted: "#9CA3AF",
        background: "#1F2937",
        background_alt: "#374151",
    },
    Theme {
        key: "dracula",
        name: "Dracula",
        primary: "#BD93F9",
        secondary: "#FF79C6",
        accent: "#8BE9FD",
        success: "#50FA7B",
        warning: "#F1FA8C",
        error: "#FF5555",
        text: "#F8F8F2",
        muted: "#6272A4",
        background: "#282A36",
        background_alt: "#44475A",
    },
    Theme {
        key: "nord",
        name: "Nord",
        primary: "#5E81AC",
        secondary: "#81A1C1",
        accent: "#88C0D0",
        success: "#A3BE8C",
        warning: "#EBCB8B",
        error: "#BF616A",
        text: "#ECEFF4",
        muted: "#4C566A",
        background: "#2E3440",
        background_alt: "#3B4252",
    },
    Theme {
        key: "gruvbox",
        name: "Gruvbox Dark",
        primary: "#B16286",
        secondary: "#D3869B",
        accent: "#8EC07C",
        success: "#B8BB26",
        warning: "#FABD2F",
        error: "#FB4934",
        text: "#EBDBB2",
        muted: "#928374",
        background: "#282828",
        background_alt: "#3C3836",
    },
    Theme {
        key: "solarized",
        name: "Solarized Dark",
        primary: "#268BD2",
        secondary: "#2AA198",
        accent: "#6C71C4",
        success: "#859900",
        warning: "#B58900",
        error: "#DC322F",
        text: "#93A1A1",
        muted: "#586E75",
        background: "#002B36",
        background_alt: "#073642",
    },
    Theme {
        key: "monokai",
        name: "Monokai",
        primary: "#F92672",
        secondary: "#AE81FF",
        accent: "#66D9EF",
        success: "#A6E22E",
        warning: "#E6DB74",
        error: "#F92672",
        text: "#F8F8F2",
        muted: "#75715E",
        background: "#272822",
        background_alt: "#3E3D32",
    },
    Theme {
        key: "tokyo",
        name: "Tokyo Night",
        primary: "#7AA2F7",
        secondary: "#BB9AF7",
        accent: "#7DCFFF",
        success: "#9ECE6A",
        warning: "#E0AF68",
        error: "#F7768E",
        text: "#C0CAF5",
        muted: "#565F89",
        background: "#1A1B26",
        background_alt: "#24283B",
    },
    Theme {
        key: "catppuccin",
        name: "Catppuccin",
        primary: "#CBA6F7",
        secondary: "#F5C2E7",
        accent: "#89DCEB",
        success: "#A6E3A1",
        warning: "#F9E2AF",
        error: "#F38BA8",
        text: "#CDD6F4",
        muted: "#6C7086",
        background: "#1E1E2E",
        background_alt: "#313244",
    },
];

pub fn find_theme(key: &str) -> Option<Theme> {
    THEMES.iter().find(|t| t.key == key).copied()
}

pub fn default_theme() -> Theme {
    THEMES[0]
}

/// Persistence for the active theme choice.
pub trait ThemeStore {
    /// The persisted theme, or the default when there is none usable.
    fn load(&self) -> Theme;
    /// Persist `key`. Unknown keys are rejected before any I/O.
    fn save(&self, key: &str) -> Result<Theme, StoreError>;
}

pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Theme {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No theme file at {} ({}), using default", self.path.display(), e);
                return default_theme();
            }
        };
        let key: String = match serde_json::from_str(&raw) {
            Ok(key) => key,
            Err(e) => {
                warn!("Corrupt theme file {}: {}", self.path.display(), e);
                return default_theme();
            }
        };
        find_theme(&key).unwrap_or_else(|| {
            warn!("Unknown theme '{}' in {}, using default", key, self.path.display());
            default_theme()
        })
    }

    fn save(&self, key: &str) -> Result<Theme, StoreError> {
        let theme = find_theme(key).ok_or_else(|| {
            StoreError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown theme '{}'", key),
            ))
        })?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            paths::ensure_dir(parent)?;
        }
        let payload = serde_json::to_string(theme.key).map_err(io::Error::from)?;
        fs::write(&self.path, payload)?;
        info!("Saved theme '{}' to {}", theme.key, self.path.display());
        Ok(theme)
    }
}
