//! Error handling for the biblio HTTP layer.
//!
//! Refusals coming out of the domain services are ordinary values; this
//! module is where they become status codes. Not-found maps to 404,
//! business refusals to 400, malformed request fields to 422.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// JSON body attached to every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error with per-field details.
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error (business refusal).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { details, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "not_found", message, Vec::new())
            }
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "bad_request", message, Vec::new())
            }
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                e.to_string(),
                Vec::new(),
            ),
        };

        let trace_id = Uuid::now_v7();

        tracing::error!(
            trace_id = %trace_id,
            error_code = code,
            status_code = status.as_u16(),
            "request error"
        );

        // In production, hide internal error details.
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "an internal server error occurred".to_string()
        } else {
            message
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
            details,
            trace_id: trace_id.to_string(),
            timestamp: OffsetDateTime::now_utc().to_string(),
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn validation_error_keeps_details() {
        let details = vec![serde_json::json!({"field": "title", "error": "required"})];
        let error = AppError::validation(details.clone(), "invalid book fields");

        match error {
            AppError::Validation {
                details: d,
                message,
            } => {
                assert_eq!(d, details);
                assert_eq!(message, "invalid book fields");
            }
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::bad_request("no copies available").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_maps_to_422() {
        let response = AppError::validation(Vec::new(), "bad fields").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = AppError::Internal(anyhow::anyhow!("store unavailable")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
