//! Week view endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use weekboard_core::{NoteDate, WeekView};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/week", get(get_week))
}

#[derive(Deserialize)]
pub struct WeekQuery {
    /// Any date inside the wanted week; defaults to today.
    pub date: Option<String>,
}

/// GET /week?date=YYYY-MM-DD - The Monday-to-Sunday week containing a date
async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekView>, ApiError> {
    let reference = match query.date {
        Some(raw) => raw.parse()?,
        None => NoteDate::today(),
    };

    let week = state.vault.read_week(reference).await?;
    Ok(Json(week))
}
