//! # Core
//!
//! NoteType's domain logic: the session state machine, the file-backed
//! collaborators it drives, and the single-shot commands behind the CLI.
//! Nothing in here touches a terminal.
//!
//! ```text
//!   key event ──► tui::keymap ──► Action
//!                                   │
//!                                   ▼
//!                   update(&mut Session, &mut Collaborators, Action)
//!                                   │                │
//!                       Effect ◄────┘                ▼
//!                 (Quit, FocusEditor)     ContentStore  ThemeStore
//!                                         TemplateEngine  clock
//!
//!   clap subcommand ──► commands::* ──► the same Collaborators
//! ```
//!
//! Errors from the collaborators are `StoreError`. The session turns them
//! into a status message; commands hand them back to `main`.
//!
//! - [`state`]: `Session`, `Mode` and the active `SelectList`
//! - [`action`]: `Action`, `Effect`, `Collaborators` and `update()`
//! - [`store`], [`tags`], [`templates`], [`theme`]: file-backed collaborators
//! - [`editor`]: the text buffer behind the editor view
//! - [`commands`]: one function per CLI subcommand
//! - [`config`], [`paths`]: where things live on disk

pub mod action;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod paths;
pub mod state;
pub mod store;
pub mod tags;
pub mod templates;
pub mod theme;
