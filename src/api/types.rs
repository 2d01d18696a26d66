// src/api/types.rs

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infra::errors::CoachError;
use crate::view::ScreenView;

/// Query string for the persona listing.
#[derive(Debug, Default, Deserialize)]
pub struct PersonaQuery {
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// A session id plus the projection of its current screen.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: ScreenView,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &CoachError) -> StatusCode {
    match err {
        CoachError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoachError::InvalidEvent { .. } => StatusCode::CONFLICT,
        CoachError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
        CoachError::BackendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        CoachError::Config(_) | CoachError::Io(_) | CoachError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<CoachError> for ErrorResponse {
    fn from(err: CoachError) -> Self {
        Self {
            kind: err.kind().to_string(),
            error: err.to_string(),
        }
    }
}

pub fn api_error(err: CoachError) -> ApiError {
    (status_for(&err), Json(err.into()))
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            kind: "bad_request".into(),
        }),
    )
}
