//! Error types for geographic resolution.

use thiserror::Error;

/// Provider adapter errors.
///
/// All variants are absorbed at the resolver boundary: a failing adapter is
/// logged and the fallback chain continues with the next one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No API credentials configured for {provider}")]
    MissingCredentials { provider: String },

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Request to {provider} timed out")]
    Timeout { provider: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Validation errors for resolver inputs.
///
/// Surfaced to the HTTP boundary as 400 responses; the resolver refuses to
/// run the fallback chain with an incomplete key tuple.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Master error type for emlak geo operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmlakError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for emlak geo operations.
pub type EmlakResult<T> = Result<T, EmlakError>;
