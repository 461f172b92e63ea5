pub mod day;
pub mod events;
pub mod week;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weekboard_core::BoardError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert core errors to HTTP responses.
///
/// Client mistakes (bad date, bad index) are 400s; everything else is a 500.
pub struct ApiError(BoardError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            BoardError::InvalidDate(_)
            | BoardError::InvalidIndex { .. }
            | BoardError::DateOutsideWeek(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (self.status(), body).into_response()
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        Self(err)
    }
}
