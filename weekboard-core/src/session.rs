//! Client-side board state with optimistic edits and echo suppression.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::date::NoteDate;
use crate::error::{BoardError, BoardResult};
use crate::notifier::NoteEvent;
use crate::task::{DayNote, Task, TaskFormat, WeekView};
use crate::vault::Vault;

/// How long after a local write incoming change events for that date are
/// treated as echo.
pub const DEFAULT_SUPPRESS_WINDOW: Duration = Duration::from_secs(1);

/// The week of tasks a viewer holds, kept live against a vault.
///
/// Local edits are applied to the held [`WeekView`] immediately and then
/// written through to the vault; the affected date is suppressed for a short
/// window so the watcher's echo of our own write does not bounce the board.
/// A failed write leaves the optimistic local state in place — the next
/// non-suppressed event or [`refresh`](SyncSession::refresh) reconciles it.
pub struct SyncSession {
    vault: Vault,
    week: WeekView,
    /// Per-date suppression expiry. A fresh write simply overwrites the
    /// previous expiry; windows for different dates are independent.
    suppressed: HashMap<NoteDate, Instant>,
    suppress_window: Duration,
}

impl SyncSession {
    /// Open a session on the week containing `reference`.
    pub async fn open(vault: Vault, reference: NoteDate) -> BoardResult<Self> {
        let week = vault.read_week(reference).await?;

        Ok(SyncSession {
            vault,
            week,
            suppressed: HashMap::new(),
            suppress_window: DEFAULT_SUPPRESS_WINDOW,
        })
    }

    pub fn with_suppress_window(mut self, window: Duration) -> Self {
        self.suppress_window = window;
        self
    }

    /// The week currently on the board.
    pub fn week(&self) -> &WeekView {
        &self.week
    }

    /// Re-read the whole week from the vault, dropping any suppression.
    /// Used after the event stream lagged or reconnected.
    pub async fn refresh(&mut self) -> BoardResult<()> {
        self.week = self.vault.read_week(self.week.dates[0]).await?;
        self.suppressed.clear();
        Ok(())
    }

    /// Switch the board to the week containing `reference`.
    pub async fn load_week(&mut self, reference: NoteDate) -> BoardResult<()> {
        self.week = self.vault.read_week(reference).await?;
        self.suppressed.clear();
        Ok(())
    }

    /// Apply an incoming change event to the board. Returns whether the
    /// board changed: events for suppressed dates (echo of our own writes)
    /// and for dates outside the held week are discarded.
    pub fn apply_event(&mut self, event: &NoteEvent) -> bool {
        if self.is_suppressed(event.date) {
            tracing::debug!("suppressed echo event for {}", event.date);
            return false;
        }

        self.week.replace_day(DayNote {
            date: event.date,
            tasks: event.tasks.clone(),
            exists: event.exists,
        })
    }

    /// Flip a task's completion state. Plain tasks become checkbox tasks,
    /// since only checkbox syntax can record completion.
    pub async fn toggle_task(&mut self, date: NoteDate, index: usize) -> BoardResult<()> {
        let mut tasks = self.day_tasks(date)?;
        self.check_index(&tasks, index)?;

        tasks[index].toggle();
        self.update_day(date, tasks).await
    }

    /// Append a new task to the end of a day.
    pub async fn add_task(
        &mut self,
        date: NoteDate,
        text: impl Into<String>,
        format: TaskFormat,
    ) -> BoardResult<()> {
        let mut tasks = self.day_tasks(date)?;
        tasks.push(Task::new(text, format));
        self.update_day(date, tasks).await
    }

    /// Replace a task's text.
    pub async fn edit_task(
        &mut self,
        date: NoteDate,
        index: usize,
        text: impl Into<String>,
    ) -> BoardResult<()> {
        let mut tasks = self.day_tasks(date)?;
        self.check_index(&tasks, index)?;

        tasks[index].text = text.into();
        self.update_day(date, tasks).await
    }

    /// Delete a task by position. Positions after it shift down.
    pub async fn delete_task(&mut self, date: NoteDate, index: usize) -> BoardResult<()> {
        let mut tasks = self.day_tasks(date)?;
        self.check_index(&tasks, index)?;

        tasks.remove(index);
        self.update_day(date, tasks).await
    }

    /// Move a task to another position in the same day. `to` is the slot
    /// position before the move, so it may be one past the end; moving a
    /// task downward lands it just before the task that was at `to`.
    pub async fn reorder_task(&mut self, date: NoteDate, from: usize, to: usize) -> BoardResult<()> {
        let mut tasks = self.day_tasks(date)?;
        self.check_index(&tasks, from)?;
        if to > tasks.len() {
            return Err(BoardError::InvalidIndex {
                index: to,
                len: tasks.len(),
            });
        }
        if to == from {
            return Ok(());
        }

        let task = tasks.remove(from);
        let insert_at = if to > from { to - 1 } else { to };
        tasks.insert(insert_at, task);

        self.update_day(date, tasks).await
    }

    /// Move a task to another day, inserting at `to_index` (or at the end
    /// when absent). Both days are written and suppressed.
    pub async fn move_task(
        &mut self,
        from_date: NoteDate,
        from_index: usize,
        to_date: NoteDate,
        to_index: Option<usize>,
    ) -> BoardResult<()> {
        if from_date == to_date {
            let to = to_index.unwrap_or_else(|| {
                self.week
                    .day(from_date)
                    .map(|d| d.tasks.len())
                    .unwrap_or(0)
            });
            return self.reorder_task(from_date, from_index, to).await;
        }

        let mut from_tasks = self.day_tasks(from_date)?;
        let mut to_tasks = self.day_tasks(to_date)?;
        self.check_index(&from_tasks, from_index)?;

        let insert_at = to_index.unwrap_or(to_tasks.len());
        if insert_at > to_tasks.len() {
            return Err(BoardError::InvalidIndex {
                index: insert_at,
                len: to_tasks.len(),
            });
        }

        let task = from_tasks.remove(from_index);
        to_tasks.insert(insert_at, task);

        self.update_day(from_date, from_tasks).await?;
        self.update_day(to_date, to_tasks).await
    }

    /// Apply a new task list to a day: board first, then suppression, then
    /// the write-through.
    async fn update_day(&mut self, date: NoteDate, tasks: Vec<Task>) -> BoardResult<()> {
        self.week.replace_day(DayNote {
            date,
            tasks: tasks.clone(),
            exists: true,
        });
        self.suppressed
            .insert(date, Instant::now() + self.suppress_window);

        self.vault.write(date, &tasks).await
    }

    fn is_suppressed(&mut self, date: NoteDate) -> bool {
        let now = Instant::now();
        self.suppressed.retain(|_, expiry| *expiry > now);
        self.suppressed.contains_key(&date)
    }

    fn day_tasks(&self, date: NoteDate) -> BoardResult<Vec<Task>> {
        self.week
            .day(date)
            .map(|day| day.tasks.clone())
            .ok_or(BoardError::DateOutsideWeek(date))
    }

    fn check_index(&self, tasks: &[Task], index: usize) -> BoardResult<()> {
        if index >= tasks.len() {
            return Err(BoardError::InvalidIndex {
                index,
                len: tasks.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NoteEventKind;
    use tempfile::TempDir;

    fn date(s: &str) -> NoteDate {
        s.parse().unwrap()
    }

    fn update_event(date_str: &str, texts: &[&str]) -> NoteEvent {
        NoteEvent {
            kind: NoteEventKind::Update,
            date: date(date_str),
            tasks: texts
                .iter()
                .map(|t| Task::new(*t, TaskFormat::Plain))
                .collect(),
            exists: true,
        }
    }

    async fn session_with(texts: &[&str]) -> (TempDir, SyncSession) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());

        let tasks: Vec<Task> = texts
            .iter()
            .map(|t| Task::new(*t, TaskFormat::Plain))
            .collect();
        vault.write(date("2026-02-05"), &tasks).await.unwrap();

        let session = SyncSession::open(vault, date("2026-02-05")).await.unwrap();
        (dir, session)
    }

    fn texts_of(session: &SyncSession, date_str: &str) -> Vec<String> {
        session
            .week()
            .day(date(date_str))
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_open_loads_the_reference_week() {
        let (_dir, session) = session_with(&["a"]).await;

        assert_eq!(session.week().dates[0], date("2026-02-02"));
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["a"]);
    }

    #[tokio::test]
    async fn test_event_replaces_day_wholesale() {
        let (_dir, mut session) = session_with(&["a"]).await;

        assert!(session.apply_event(&update_event("2026-02-05", &["x", "y"])));
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_event_outside_week_is_discarded() {
        let (_dir, mut session) = session_with(&["a"]).await;

        assert!(!session.apply_event(&update_event("2026-03-01", &["x"])));
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["a"]);
    }

    #[tokio::test]
    async fn test_local_write_suppresses_echo_until_expiry() {
        let (_dir, session) = session_with(&["a"]).await;
        let mut session = session.with_suppress_window(Duration::from_millis(50));

        session
            .add_task(date("2026-02-05"), "b", TaskFormat::Plain)
            .await
            .unwrap();

        // Echo inside the window is dropped.
        assert!(!session.apply_event(&update_event("2026-02-05", &["a", "b"])));
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["a", "b"]);

        // After expiry the same date updates again.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(session.apply_event(&update_event("2026-02-05", &["external"])));
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["external"]);
    }

    #[tokio::test]
    async fn test_suppression_is_per_date() {
        let (_dir, mut session) = session_with(&["a"]).await;

        session
            .add_task(date("2026-02-05"), "b", TaskFormat::Plain)
            .await
            .unwrap();

        // A different date in the same week is not suppressed.
        assert!(session.apply_event(&update_event("2026-02-03", &["other day"])));
    }

    #[tokio::test]
    async fn test_toggle_converts_plain_and_writes_through() {
        let (_dir, mut session) = session_with(&["a"]).await;
        let day = date("2026-02-05");

        session.toggle_task(day, 0).await.unwrap();

        let task = &session.week().day(day).unwrap().tasks[0];
        assert!(task.completed);
        assert_eq!(task.format, TaskFormat::Checkbox);

        // The note on disk was rewritten too.
        let on_disk = session.vault.read(day).await.unwrap();
        assert_eq!(on_disk.tasks, session.week().day(day).unwrap().tasks);
    }

    #[tokio::test]
    async fn test_delete_out_of_range_changes_nothing() {
        let (_dir, mut session) = session_with(&["a"]).await;
        let day = date("2026-02-05");

        let err = session.delete_task(day, 3).await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidIndex { index: 3, len: 1 }));

        assert_eq!(texts_of(&session, "2026-02-05"), vec!["a"]);
        assert_eq!(session.vault.read(day).await.unwrap().tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_mutation_outside_week_is_rejected() {
        let (_dir, mut session) = session_with(&["a"]).await;

        let err = session
            .add_task(date("2026-03-01"), "nope", TaskFormat::Plain)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::DateOutsideWeek(_)));
    }

    #[tokio::test]
    async fn test_reorder_adjusts_downward_insert() {
        let (_dir, mut session) = session_with(&["a", "b", "c"]).await;
        let day = date("2026-02-05");

        // Dropping "a" on the slot before "c" lands it between "b" and "c".
        session.reorder_task(day, 0, 2).await.unwrap();
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["b", "a", "c"]);

        // Moving upward inserts at the slot itself.
        session.reorder_task(day, 2, 0).await.unwrap();
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_move_task_across_days_writes_both_notes() {
        let (_dir, mut session) = session_with(&["a", "b"]).await;
        let from = date("2026-02-05");
        let to = date("2026-02-06");

        session.move_task(from, 0, to, None).await.unwrap();

        assert_eq!(texts_of(&session, "2026-02-05"), vec!["b"]);
        assert_eq!(texts_of(&session, "2026-02-06"), vec!["a"]);

        let from_disk = session.vault.read(from).await.unwrap();
        let to_disk = session.vault.read(to).await.unwrap();
        assert_eq!(from_disk.tasks.len(), 1);
        assert_eq!(to_disk.tasks[0].text, "a");

        // Both dates are now suppressed.
        assert!(!session.apply_event(&update_event("2026-02-05", &["echo"])));
        assert!(!session.apply_event(&update_event("2026-02-06", &["echo"])));
    }

    #[tokio::test]
    async fn test_refresh_rereads_week_and_clears_suppression() {
        let (_dir, mut session) = session_with(&["a"]).await;
        let day = date("2026-02-05");

        session.add_task(day, "b", TaskFormat::Plain).await.unwrap();

        // Someone else rewrites the note behind our back.
        session
            .vault
            .write(day, &[Task::new("rewritten", TaskFormat::Plain)])
            .await
            .unwrap();

        session.refresh().await.unwrap();
        assert_eq!(texts_of(&session, "2026-02-05"), vec!["rewritten"]);
        assert!(session.apply_event(&update_event("2026-02-05", &["no longer suppressed"])));
    }
}
