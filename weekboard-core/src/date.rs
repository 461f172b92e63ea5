//! Calendar dates in the canonical form that keys daily notes.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Format of the canonical date form, `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date in the canonical zero-padded `YYYY-MM-DD` form.
///
/// Daily notes are keyed by this form: it names the note file on disk and is
/// the wire representation in the API and the event stream. Parsing is
/// strict, so `2026-2-5` is rejected even though it names a valid date and
/// every accepted string maps to exactly one filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteDate(NaiveDate);

impl NoteDate {
    /// Today's date on the local clock.
    pub fn today() -> Self {
        NoteDate(Local::now().date_naive())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        NoteDate(date)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// The filename of this date's note, e.g. `2026-02-05.md`.
    pub fn filename(&self) -> String {
        format!("{self}.md")
    }

    /// The date a note filename is keyed by, if it has the canonical
    /// `YYYY-MM-DD.md` shape. Temp files, attachments and the like are none.
    pub fn from_filename(name: &str) -> Option<Self> {
        name.strip_suffix(".md")?.parse().ok()
    }
}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for NoteDate {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| BoardError::InvalidDate(s.to_string()))?;

        // chrono accepts unpadded fields; only the exact canonical form is
        // accepted here, so formatting back must reproduce the input.
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(BoardError::InvalidDate(s.to_string()));
        }

        Ok(NoteDate(date))
    }
}

impl Serialize for NoteDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
