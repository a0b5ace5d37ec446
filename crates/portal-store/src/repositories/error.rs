//! Error handling utilities for repositories

use portal_core::error::DomainError;
use portal_core::value_objects::RecordId;

use crate::store::StoreError;

/// Convert a storage backend error to DomainError
pub fn map_store_error(e: StoreError) -> DomainError {
    DomainError::StorageError(e.to_string())
}

/// Create a "corrupt state" error for unparsable data under `key`
pub fn corrupt_state(key: &str, e: &serde_json::Error) -> DomainError {
    DomainError::CorruptState {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

/// Create a "report not found" error
pub fn report_not_found(id: &RecordId) -> DomainError {
    DomainError::ReportNotFound(id.clone())
}
