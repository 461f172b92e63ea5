//! Single-day read and edit endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use weekboard_core::{DayNote, NoteDate, Task, TaskFormat};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/day/{date}", get(get_day))
        .route("/day/{date}", put(put_day))
        .route("/day/{date}/task", post(add_task))
        .route("/day/{date}/task/{index}", delete(remove_task))
}

/// Response for every mutating day endpoint: the full task list after the
/// change.
#[derive(Serialize)]
pub struct DayWriteResponse {
    pub success: bool,
    pub date: NoteDate,
    pub tasks: Vec<Task>,
}

/// GET /day/:date - One day's tasks. A missing note is an empty day, not a 404
async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayNote>, ApiError> {
    let date: NoteDate = date.parse()?;
    Ok(Json(state.vault.read(date).await?))
}

/// Request body for replacing a day's tasks
#[derive(Deserialize)]
pub struct UpdateDayRequest {
    pub tasks: Vec<Task>,
}

/// PUT /day/:date - Replace the whole task list for a day
async fn put_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(req): Json<UpdateDayRequest>,
) -> Result<Json<DayWriteResponse>, ApiError> {
    let date: NoteDate = date.parse()?;
    state.vault.write(date, &req.tasks).await?;

    Ok(Json(DayWriteResponse {
        success: true,
        date,
        tasks: req.tasks,
    }))
}

/// Request body for appending a task
#[derive(Deserialize)]
pub struct AddTaskRequest {
    pub text: String,
    #[serde(default)]
    pub format: TaskFormat,
}

/// POST /day/:date/task - Append a task to a day (plain unless stated)
async fn add_task(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(req): Json<AddTaskRequest>,
) -> Result<Json<DayWriteResponse>, ApiError> {
    let date: NoteDate = date.parse()?;
    let tasks = state.vault.append_task(date, req.text, req.format).await?;

    Ok(Json(DayWriteResponse {
        success: true,
        date,
        tasks,
    }))
}

/// DELETE /day/:date/task/:index - Remove a task by position
async fn remove_task(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> Result<Json<DayWriteResponse>, ApiError> {
    let date: NoteDate = date.parse()?;
    let tasks = state.vault.remove_task(date, index).await?;

    Ok(Json(DayWriteResponse {
        success: true,
        date,
        tasks,
    }))
}
