// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A collaborator's settings are missing. Raised before any network call.
    #[error("{0}")]
    Configuration(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-success status (or unreachable service) from a collaborator.
    /// The status is passed through to the caller.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to parse recipe JSON: {0}")]
    RecipeParse(String),

    #[error("Invalid response from AI service")]
    InvalidAiResponse,

    /// The backend could not be queried for a recipe.
    #[error("Failed to fetch recipe: {0}")]
    RecipeFetch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for an upstream error. Codes outside the valid range
    /// (or 0 for transport failures) map to 502.
    fn upstream_status(status: u16) -> StatusCode {
        StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

/// Malformed, mistyped or missing JSON bodies are the caller's fault.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!(error = %msg, "Missing configuration");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Timeout => {
                tracing::warn!("Upstream request timed out");
                (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string(), None)
            }
            AppError::Upstream { status, message } => {
                tracing::error!(status, error = %message, "Upstream service error");
                (Self::upstream_status(*status), message.clone(), None)
            }
            AppError::RecipeParse(msg) => {
                tracing::error!(error = %msg, "Recipe parse failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse recipe JSON".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::InvalidAiResponse => {
                tracing::error!("AI response missing completion content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Invalid response from AI service".to_string(),
                    None,
                )
            }
            AppError::RecipeFetch(msg) => {
                tracing::error!(error = %msg, "Recipe fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch recipe".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, details };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
