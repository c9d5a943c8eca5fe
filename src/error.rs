//! HTTP-facing error type shared by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// No bearer token on a protected route. Answered with an empty body.
    #[error("missing bearer token")]
    MissingToken,

    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Bearer token present but its signature or expiry did not check out.
    #[error("invalid token")]
    InvalidToken,

    /// Not found, reported under the `error` key.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Not found, reported under the `message` key.
    #[error("not found: {0}")]
    NotFoundMessage(&'static str),

    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::MissingToken => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Incorrect email or password" })),
            )
                .into_response(),
            ApiError::InvalidToken => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Invalid token" })),
            )
                .into_response(),
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFoundMessage(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": msg }))).into_response()
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Logs a store or library failure and collapses it into a generic 500.
pub fn internal(op: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |e| {
        error!(error = %e, op, "request failed");
        ApiError::Internal
    }
}
