// src/error.rs
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Request-level failures. Each kind maps to exactly one response
/// shape, so handlers bubble errors with `?` and stay out of the
/// status-code business.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!("storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error", "details": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Fatal startup problems. These never reach a request handler; `main`
/// logs them and exits.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("DATABASE_URL is not set. Add it to the environment or a .env file")]
    MissingDatabaseUrl,
    #[error("database setup failed: {0}")]
    Database(#[from] sqlx::Error),
}
