use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::puzzle::errors::{PuzzleError, PuzzleErrorKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Puzzle error: {0}")]
    Puzzle(#[from] PuzzleError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail): (StatusCode, &str, String, Value) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), json!({})),
            AppError::Puzzle(e) => {
                let kind = e.kind();
                let status = match kind {
                    PuzzleErrorKind::InvalidOptions => StatusCode::BAD_REQUEST,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                tracing::warn!(code = kind.code(), "Puzzle rejected: {e}");
                (status, kind.code(), e.to_string(), e.detail())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    json!({}),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "detail": detail
            }
        }));

        (status, body).into_response()
    }
}
