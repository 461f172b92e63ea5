//! Error types for the weekboard ecosystem.

use thiserror::Error;

use crate::date::NoteDate;

/// Errors that can occur in weekboard operations.
///
/// A missing note file is deliberately not represented here: reading a date
/// that has no file yields an empty day, not an error.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid task index {index}: the note has {len} tasks")]
    InvalidIndex { index: usize, len: usize },

    #[error("Date {0} is outside the visible week")]
    DateOutsideWeek(NoteDate),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for weekboard operations.
pub type BoardResult<T> = Result<T, BoardError>;
