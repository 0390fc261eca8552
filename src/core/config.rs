//! # Configuration
//!
//! Where notes, journal entries, templates, the theme file and the log live,
//! plus the log level and the default `{{title}}`. Each value is taken from
//! the first source that sets it: CLI flag, `NOTETYPE_*` env var,
//! `~/.notetype/config.toml`, built-in default.
//!
//! The first run writes a fully commented-out `config.toml` as a reference.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::paths;

// ============================================================================
// File format (every field optional)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotetypeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Title used for `{{title}}` when a template is opened from the TUI.
    pub default_title: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PathsConfig {
    pub notes_dir: Option<PathBuf>,
    pub journal_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub theme_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "New Entry";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub notes_dir: PathBuf,
    pub journal_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub theme_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub default_title: String,
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub notes_dir: Option<PathBuf>,
    pub journal_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.notetype/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    paths::app_dir().map(|d| d.join("config.toml"))
}

/// Read `~/.notetype/config.toml`.
///
/// A missing file yields the defaults (and writes the reference file);
/// a malformed one is `ConfigError::Parse`.
pub fn load_config() -> Result<NotetypeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NotetypeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NotetypeConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NotetypeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# NoteType Configuration
# Every setting is optional. CLI flags beat NOTETYPE_* env vars,
# which beat this file, which beats the built-in defaults.

# [general]
# default_title = "New Entry"        # {{title}} for templates opened in the TUI
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [paths]
# notes_dir = "."                    # Or set NOTETYPE_NOTES_DIR
# journal_dir = "~/.notetype/journal"  # Or set NOTETYPE_JOURNAL_DIR
# templates_dir = "~/.notetype/templates"
# theme_file = "~/.notetype/theme.json"
# log_file = "~/.notetype/notetype.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = paths::ensure_dir(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NotetypeConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Notes: CLI → env → config → current directory
    let notes_dir = cli
        .notes_dir
        .clone()
        .or_else(|| env_path("NOTETYPE_NOTES_DIR"))
        .or_else(|| config.paths.notes_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    // Journal: CLI → env → config → ~/.notetype/journal
    let journal_dir = cli
        .journal_dir
        .clone()
        .or_else(|| env_path("NOTETYPE_JOURNAL_DIR"))
        .or_else(|| config.paths.journal_dir.clone())
        .unwrap_or_else(paths::default_journal_dir);

    let templates_dir = env_path("NOTETYPE_TEMPLATES_DIR")
        .or_else(|| config.paths.templates_dir.clone())
        .unwrap_or_else(paths::default_templates_dir);

    let theme_file = config
        .paths
        .theme_file
        .clone()
        .unwrap_or_else(paths::default_theme_file);

    let log_file = config
        .paths
        .log_file
        .clone()
        .unwrap_or_else(paths::default_log_file);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("NOTETYPE_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .map(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        notes_dir,
        journal_dir,
        templates_dir,
        theme_file,
        log_file,
        log_level,
        default_title: config
            .general
            .default_title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Parse a log level name, falling back to the default on anything unknown.
fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using {}", name, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}
