//! Application error types
//!
//! Unified error handling for the entire application.

use portal_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotSignedIn,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit code for this error (sysexits.h conventions)
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            // EX_DATAERR
            Self::Validation(_) | Self::InvalidInput(_) => 65,

            // EX_NOINPUT
            Self::NotFound(_) => 66,

            // EX_NOPERM
            Self::InvalidCredentials | Self::NotSignedIn => 77,

            // EX_IOERR
            Self::Storage(_) => 74,

            // EX_SOFTWARE
            Self::Internal(_) => 70,

            // EX_CONFIG
            Self::Config(_) => 78,

            // Map domain errors to the closest code
            Self::Domain(e) => {
                if e.is_not_found() {
                    66
                } else if e.is_validation() {
                    65
                } else if e.is_storage() {
                    74
                } else {
                    70
                }
            }
        }
    }

    /// Get error code for machine-readable output
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotSignedIn => "NOT_SIGNED_IN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Caused by what the user supplied rather than by the system
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self.exit_code(), 65 | 66 | 77)
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error body printed by the console in JSON mode
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
