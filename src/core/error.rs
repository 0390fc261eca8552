//! # Store Errors
//!
//! One error type for every collaborator the session talks to: the content
//! store, the template engine, and the theme store. The session never lets
//! one of these escape a transition; it turns them into a status message.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    /// The target note, journal entry, or file does not exist.
    NotFound(String),
    /// Permission, disk, or directory-creation failure.
    Io(io::Error),
    /// No built-in template and no custom template file with this name.
    TemplateNotFound(String),
    /// A save or append with nothing worth writing.
    EmptyInput,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "'{what}' not found"),
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::TemplateNotFound(name) => write!(f, "template '{name}' not found"),
            StoreError::EmptyInput => write!(f, "no content provided"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Classify an I/O error on `what`: a missing file becomes `NotFound`,
/// anything else stays `Io`.
pub fn classify(e: io::Error, what: &str) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(what.to_string())
    } else {
        StoreError::Io(e)
    }
}
