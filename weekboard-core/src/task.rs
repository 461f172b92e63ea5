//! Task and board view types shared across the weekboard ecosystem.

use serde::{Deserialize, Serialize};

use crate::date::NoteDate;

/// How a task is written in its daily note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskFormat {
    /// A `- [ ]` / `- [x]` list item carrying a completion marker.
    Checkbox,
    /// A bare `- ` list item. Plain tasks are never completed.
    #[default]
    Plain,
}

/// One task line in a daily note.
///
/// Tasks carry no identifier: within a day a task is addressed by its
/// position in the list, and inserting or deleting shifts the positions
/// after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub completed: bool,
    pub format: TaskFormat,
}

impl Task {
    /// A new, not yet completed task.
    pub fn new(text: impl Into<String>, format: TaskFormat) -> Self {
        Task {
            text: text.into(),
            completed: false,
            format,
        }
    }

    /// Flip the completion state. Plain tasks become checkbox tasks, since
    /// only checkbox syntax can record completion.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.format = TaskFormat::Checkbox;
    }
}

/// The tasks of one calendar day, as read from its note file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNote {
    pub date: NoteDate,
    pub tasks: Vec<Task>,
    /// Whether the note file was present at read time. A missing file is an
    /// empty day, not an error.
    pub exists: bool,
}

impl DayNote {
    /// The empty day standing in for a date with no note file.
    pub fn missing(date: NoteDate) -> Self {
        DayNote {
            date,
            tasks: Vec::new(),
            exists: false,
        }
    }
}

/// A Monday-to-Sunday window of day notes.
///
/// Always seven days; `dates[i]` and `days[i].date` match by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub dates: Vec<NoteDate>,
    pub days: Vec<DayNote>,
}

impl WeekView {
    /// The day note for a date, if the date falls inside this week.
    pub fn day(&self, date: NoteDate) -> Option<&DayNote> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Swap in a fresh note for its slot. Returns false (and changes
    /// nothing) when the date is outside this week.
    pub fn replace_day(&mut self, note: DayNote) -> bool {
        match self.dates.iter().position(|d| *d == note.date) {
            Some(idx) => {
                self.days[idx] = note;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
