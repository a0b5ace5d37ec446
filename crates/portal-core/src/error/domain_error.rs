//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use thiserror::Error;

use crate::value_objects::{RecordId, ShiftTime};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(RecordId),

    #[error("Maintenance report not found: {0}")]
    ReportNotFound(RecordId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Start time must be before end time ({start} - {end})")]
    InvalidRange { start: ShiftTime, end: ShiftTime },

    #[error("This shift overlaps with an existing shift for {user_name} on {date}")]
    Overlap { user_name: String, date: NaiveDate },

    #[error("Invalid time (expected HH:mm): {0}")]
    InvalidTime(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid day of week: {0} (expected 1-7)")]
    InvalidDayOfWeek(u8),

    #[error("Invalid report status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    #[error("Corrupt data under key {key}: {reason}")]
    CorruptState { key: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(String),}

impl DomainError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::ReportNotFound(_) => "UNKNOWN_REPORT",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::Overlap { .. } => "SHIFT_OVERLAP",
            Self::InvalidTime(_) => "INVALID_TIME",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::InvalidDayOfWeek(_) => "INVALID_DAY_OF_WEEK",
            Self::InvalidStatus(_) => "INVALID_STATUS",

            Self::CorruptState { .. } => "CORRUPT_STATE",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ChannelNotFound(_) | Self::ReportNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRange { .. }
                | Self::Overlap { .. }
                | Self::InvalidTime(_)
                | Self::InvalidDate(_)
                | Self::InvalidDayOfWeek(_)
                | Self::InvalidStatus(_)
        )
    }

    /// Check if this error comes from the storage backend
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::CorruptState { .. } | Self::StorageError(_))
    }
}
