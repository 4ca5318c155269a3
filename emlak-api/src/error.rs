//! Error types for the emlak HTTP API.
//!
//! Errors are serialized as `{"error": "..."}` JSON bodies with the status
//! code derived from the error category — the wire contract the platform's
//! existing clients expect.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emlak_core::EmlakError;
use serde::Serialize;
use std::fmt;

/// Error categories for API responses. Each maps to one HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required query parameter is missing or blank.
    MissingParameter,
    /// Request input failed validation.
    ValidationFailed,
    /// Internal server error.
    InternalError,
    /// Service temporarily unavailable.
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::MissingParameter | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Structured error for API operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A required query parameter is missing or blank.
    pub fn missing_param(name: &str) -> Self {
        Self::new(
            ErrorCode::MissingParameter,
            format!("Required query parameter '{}' is missing", name),
        )
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<EmlakError> for ApiError {
    fn from(err: EmlakError) -> Self {
        match err {
            EmlakError::Validation(validation) => Self::validation_failed(validation.to_string()),
            // Provider faults are normally absorbed inside the resolver;
            // one escaping this far is an internal fault.
            EmlakError::Provider(provider) => Self::internal_error(provider.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
