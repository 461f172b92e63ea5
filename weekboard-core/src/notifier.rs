//! Broadcast of note changes to live subscribers.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::date::NoteDate;
use crate::task::{DayNote, Task};

/// What happened to a note file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteEventKind {
    /// A note file appeared for a date that had none.
    Add,
    /// An existing note file changed.
    Update,
}

/// A change to one day's note, as delivered to subscribers and the SSE
/// stream. `tasks` and `exists` carry the day's state re-read after the
/// change settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    #[serde(rename = "type")]
    pub kind: NoteEventKind,
    pub date: NoteDate,
    pub tasks: Vec<Task>,
    pub exists: bool,
}

impl NoteEvent {
    pub fn new(kind: NoteEventKind, note: DayNote) -> Self {
        NoteEvent {
            kind,
            date: note.date,
            tasks: note.tasks,
            exists: note.exists,
        }
    }
}

/// Handle identifying one subscriber in the registry.
pub type SubscriberId = Uuid;

struct Subscriber {
    id: SubscriberId,
    tx: mpsc::UnboundedSender<NoteEvent>,
}

/// Registry of live event subscribers.
///
/// Subscribers are kept in registration order. Broadcasting is
/// fire-and-forget: each event is pushed to every subscriber in turn, and a
/// subscriber whose receiving end is gone is pruned by the failed send
/// rather than retried.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Events broadcast from now on arrive on the
    /// returned receiver until it is dropped or [`unsubscribe`d].
    ///
    /// [`unsubscribe`d]: ChangeNotifier::unsubscribe
    pub fn subscribe(&self) -> (SubscriberId, mpsc::UnboundedReceiver<NoteEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        self.subscribers.lock().unwrap().push(Subscriber { id, tx });
        (id, rx)
    }

    /// Remove a subscriber on orderly disconnect. Dropped receivers are
    /// also pruned lazily by the next broadcast, so calling this is
    /// optional.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.lock().unwrap().retain(|s| s.id != id);
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Push an event to every subscriber in registration order, pruning the
    /// ones whose receiver is gone.
    pub fn broadcast(&self, event: &NoteEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();

        let before = subscribers.len();
        subscribers.retain(|s| s.tx.send(event.clone()).is_ok());

        let pruned = before - subscribers.len();
        if pruned > 0 {
            tracing::debug!("pruned {pruned} disconnected subscribers");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
