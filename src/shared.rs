use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::play::{PlayError, PlayManager};
use crate::quiz::LoadError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub play_manager: PlayManager,
}

impl AppState {
    pub fn new(play_manager: PlayManager) -> Self {
        Self { play_manager }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(_) => AppError::NotFound(err.to_string()),
            LoadError::Unavailable(_) | LoadError::Malformed(_) => {
                AppError::Upstream(err.to_string())
            }
            LoadError::NoQuestions | LoadError::InvalidQuestion { .. } => {
                AppError::Unprocessable(err.to_string())
            }
        }
    }
}

impl From<PlayError> for AppError {
    fn from(err: PlayError) -> Self {
        match err {
            PlayError::Closed(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Upstream(msg) => {
                warn!(error = %msg, "Upstream service failure");
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_map_to_http_errors() {
        assert!(matches!(
            AppError::from(LoadError::NotFound("g".to_string())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(LoadError::Unavailable("down".to_string())),
            AppError::Upstream(_)
        ));
        assert!(matches!(
            AppError::from(LoadError::NoQuestions),
            AppError::Unprocessable(_)
        ));
    }

    #[test]
    fn test_error_response_status() {
        let response = AppError::Conflict("not yet".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
