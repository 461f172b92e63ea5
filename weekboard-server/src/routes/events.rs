//! Live event stream endpoint

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::Stream;

use weekboard_core::ChangeNotifier;
use weekboard_core::notifier::SubscriberId;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(subscribe_events))
}

/// Unsubscribes when the SSE stream is dropped, i.e. when the client
/// disconnects.
struct Subscription {
    notifier: Arc<ChangeNotifier>,
    id: SubscriberId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.id);
        tracing::debug!("event subscriber {} disconnected", self.id);
    }
}

/// GET /events - Long-lived stream of note change events, one JSON object
/// per event
async fn subscribe_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (id, rx) = state.notifier.subscribe();
    tracing::debug!("event subscriber {id} connected");

    let subscription = Subscription {
        notifier: state.notifier.clone(),
        id,
    };

    let stream = futures::stream::unfold((rx, subscription), |(mut rx, sub)| async move {
        let note_event = rx.recv().await?;
        Some((Event::default().json_data(&note_event), (rx, sub)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
