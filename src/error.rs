//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Hugging Face API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("No image generated")]
    EmptyImage,

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Map errors onto HTTP responses.
///
/// Upstream failures mirror the status the inference API returned; anything
/// not explicitly matched is an internal error.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("Hugging Face API error: {}", body),
            ),
            Error::EmptyImage => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No image generated".to_string(),
            ),
            other => {
                tracing::error!("Internal error while handling request: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
