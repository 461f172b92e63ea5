//! Watching the vault directory for external note edits.
//!
//! Editors typically write a note several times in quick succession, so raw
//! filesystem events are debounced per note: each event for a date resets
//! that date's quiet-period deadline, and only once the file has stayed
//! untouched for the whole period is the note re-read and broadcast. Each
//! note goes through `pending -> stable (broadcast) -> idle` independently.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::date::NoteDate;
use crate::error::BoardResult;
use crate::notifier::{ChangeNotifier, NoteEvent, NoteEventKind};
use crate::vault::Vault;

/// How long a changed note must stay quiet before its change is broadcast.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A note with raw events inside the current quiet period.
struct PendingChange {
    deadline: Instant,
    /// Whether the date had no note before this window. Decides `add` vs
    /// `update` in the broadcast event. Raw event kinds are no help here:
    /// an atomic tmp-write + rename of a brand-new note surfaces as a
    /// rename, not a create.
    created: bool,
}

/// Watches a vault directory and feeds stabilized note changes into a
/// [`ChangeNotifier`].
///
/// Dropping the watcher stops both the filesystem watch and the debounce
/// task.
pub struct VaultWatcher {
    // Held for its side effect; dropping it ends the watch and lets the
    // debounce task drain out.
    _watcher: RecommendedWatcher,
}

impl VaultWatcher {
    /// Start watching `vault`'s directory (non-recursively). The directory
    /// must already exist.
    pub fn spawn(
        vault: Vault,
        notifier: Arc<ChangeNotifier>,
        quiet_period: Duration,
    ) -> BoardResult<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                // Receiver gone means the debounce task ended; nothing to do.
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )?;
        watcher.watch(vault.root(), RecursiveMode::NonRecursive)?;

        let known = existing_note_dates(vault.root())?;
        tracing::info!("watching vault at {}", vault.root().display());

        tokio::spawn(debounce_loop(vault, notifier, quiet_period, rx, known));

        Ok(VaultWatcher { _watcher: watcher })
    }
}

/// The dates that already have a note file, as of watch start.
fn existing_note_dates(root: &Path) -> BoardResult<HashSet<NoteDate>> {
    let mut dates = HashSet::new();
    for entry in std::fs::read_dir(root)? {
        if let Some(date) = note_date_of(&entry?.path()) {
            dates.insert(date);
        }
    }
    Ok(dates)
}

/// The per-note debounce state machine.
///
/// Raw events reset their note's deadline; an expired deadline re-reads the
/// note and broadcasts exactly one event for it.
async fn debounce_loop(
    vault: Vault,
    notifier: Arc<ChangeNotifier>,
    quiet_period: Duration,
    mut rx: mpsc::UnboundedReceiver<Result<notify::Event, notify::Error>>,
    mut known: HashSet<NoteDate>,
) {
    let mut pending: HashMap<NoteDate, PendingChange> = HashMap::new();

    loop {
        let next_deadline = pending.values().map(|p| p.deadline).min();

        tokio::select! {
            raw = rx.recv() => {
                match raw {
                    Some(Ok(event)) => {
                        register_raw_event(&mut pending, &known, &event, quiet_period);
                    }
                    Some(Err(err)) => {
                        tracing::warn!("vault watch error: {err}");
                    }
                    None => break,
                }
            }
            _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                let now = Instant::now();
                let due: Vec<NoteDate> = pending
                    .iter()
                    .filter(|(_, p)| p.deadline <= now)
                    .map(|(date, _)| *date)
                    .collect();

                for date in due {
                    let change = pending.remove(&date).unwrap();
                    if broadcast_stabilized(&vault, &notifier, date, change.created).await {
                        known.insert(date);
                    }
                }
            }
        }
    }
}

/// Fold one raw filesystem event into the pending map. Only create/modify
/// events for canonically named note files participate; temp files, other
/// names and removals are ignored.
fn register_raw_event(
    pending: &mut HashMap<NoteDate, PendingChange>,
    known: &HashSet<NoteDate>,
    event: &notify::Event,
    quiet_period: Duration,
) {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }

    for path in &event.paths {
        let Some(date) = note_date_of(path) else {
            continue;
        };

        let entry = pending.entry(date).or_insert_with(|| PendingChange {
            deadline: Instant::now() + quiet_period,
            created: !known.contains(&date),
        });
        entry.deadline = Instant::now() + quiet_period;
    }
}

/// Re-read a stabilized note and broadcast it. Returns whether the note
/// file exists, so the caller can record the date as known.
async fn broadcast_stabilized(
    vault: &Vault,
    notifier: &ChangeNotifier,
    date: NoteDate,
    created: bool,
) -> bool {
    let note = match vault.read(date).await {
        Ok(note) => note,
        Err(err) => {
            tracing::warn!("could not re-read {date} after change: {err}");
            return false;
        }
    };
    let exists = note.exists;

    let kind = if created {
        NoteEventKind::Add
    } else {
        NoteEventKind::Update
    };

    tracing::debug!("note {date} stabilized, broadcasting {kind:?}");
    notifier.broadcast(&NoteEvent::new(kind, note));

    exists
}

fn note_date_of(path: &Path) -> Option<NoteDate> {
    NoteDate::from_filename(path.file_name()?.to_str()?)
}

// ============================================================================
// Tests
// ============================================================================
