//! Core library for the weekboard ecosystem.
//!
//! A weekboard vault is a directory of daily markdown notes, one file per
//! calendar day (`2026-02-05.md`), each holding a heading and a task list.
//! This crate provides everything except a user interface:
//!
//! - [`note`]: the daily-note markdown codec,
//! - [`vault`]: reading and atomically rewriting note files,
//! - [`week`]: Monday-anchored week windows,
//! - [`notifier`] and [`watcher`]: broadcasting debounced file changes to
//!   live subscribers,
//! - [`session`]: client-side board state with optimistic edits and echo
//!   suppression,
//! - [`config`]: the shared `~/.config/weekboard/config.toml` settings.

pub mod config;
pub mod date;
pub mod error;
pub mod note;
pub mod notifier;
pub mod session;
pub mod task;
pub mod vault;
pub mod watcher;
pub mod week;

pub use config::BoardConfig;
pub use date::NoteDate;
pub use error::{BoardError, BoardResult};
pub use notifier::{ChangeNotifier, NoteEvent, NoteEventKind};
pub use session::SyncSession;
pub use task::{DayNote, Task, TaskFormat, WeekView};
pub use vault::Vault;
pub use watcher::VaultWatcher;
