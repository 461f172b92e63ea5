//! HTTP surface for weekboard: REST endpoints over the vault plus an SSE
//! stream of note changes.

pub mod routes;
pub mod singleton;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

/// The full application router over a given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::week::router())
        .merge(routes::day::router())
        .merge(routes::events::router())
        .with_state(state)
        .layer(cors)
}
