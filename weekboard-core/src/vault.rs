//! The vault: a directory of daily notes, one file per calendar day.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::date::NoteDate;
use crate::error::{BoardError, BoardResult};
use crate::note::{parse_note, serialize_note};
use crate::task::{DayNote, Task, TaskFormat, WeekView};
use crate::week::week_dates;

/// A directory of daily notes, `YYYY-MM-DD.md` per day.
///
/// The files are the only source of truth: every read decodes its file
/// fresh and every write replaces the whole file. No locking is attempted.
/// Two writers to the same date race and the last write wins.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Vault { root: root.into() }
    }

    /// The vault directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The note file backing a date.
    pub fn note_path(&self, date: NoteDate) -> PathBuf {
        self.root.join(date.filename())
    }

    /// Read one day's note. A missing file is an empty, non-existent day,
    /// not an error.
    pub async fn read(&self, date: NoteDate) -> BoardResult<DayNote> {
        let path = self.note_path(date);

        match fs::read_to_string(&path).await {
            Ok(content) => Ok(DayNote {
                date,
                tasks: parse_note(&content),
                exists: true,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(DayNote::missing(date)),
            Err(err) => Err(BoardError::Io(err)),
        }
    }

    /// Read the whole Monday-to-Sunday week containing `reference`.
    pub async fn read_week(&self, reference: NoteDate) -> BoardResult<WeekView> {
        let dates = week_dates(reference);

        let mut days = Vec::with_capacity(dates.len());
        for &date in &dates {
            days.push(self.read(date).await?);
        }

        Ok(WeekView { dates, days })
    }

    /// Replace a day's note with `tasks`, creating the vault directory if
    /// needed.
    ///
    /// The content goes to a uniquely named sibling first and is renamed
    /// into place, so watchers and concurrent readers never see a
    /// half-written note.
    pub async fn write(&self, date: NoteDate, tasks: &[Task]) -> BoardResult<()> {
        fs::create_dir_all(&self.root).await?;

        let path = self.note_path(date);
        let tmp = self
            .root
            .join(format!("{}.{}.tmp", date.filename(), Uuid::new_v4().simple()));

        fs::write(&tmp, serialize_note(date, tasks)).await?;
        if let Err(err) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(BoardError::Io(err));
        }

        Ok(())
    }

    /// Append a task to the end of a day's list and write the note back.
    /// Returns the list after the append.
    pub async fn append_task(
        &self,
        date: NoteDate,
        text: impl Into<String>,
        format: TaskFormat,
    ) -> BoardResult<Vec<Task>> {
        let mut tasks = self.read(date).await?.tasks;
        tasks.push(Task::new(text, format));

        self.write(date, &tasks).await?;
        Ok(tasks)
    }

    /// Remove the task at `index` from a day and write the note back.
    /// Returns the list after the removal; an out-of-range index leaves the
    /// file untouched.
    pub async fn remove_task(&self, date: NoteDate, index: usize) -> BoardResult<Vec<Task>> {
        let mut tasks = self.read(date).await?.tasks;
        if index >= tasks.len() {
            return Err(BoardError::InvalidIndex {
                index,
                len: tasks.len(),
            });
        }
        tasks.remove(index);

        self.write(date, &tasks).await?;
        Ok(tasks)
    }
}

// ============================================================================
// Tests
// ============================================================================
