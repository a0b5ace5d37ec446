//! Test fixtures and data generators
//!
//! Provides reusable staff sessions and request drafts for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use portal_core::Session;
use portal_service::dto::{AddShiftRequest, SendMessageRequest, SubmitReportRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Staff
// ============================================================================

pub fn fatima() -> Session {
    Session::new("1", "Fatima123", "Fatima Samer", Some("AI".to_string()))
}

pub fn hala() -> Session {
    Session::new("2", "Hala123", "Hala Samer", Some("AI".to_string()))
}

pub fn aliya() -> Session {
    Session::new("3", "Aliya123", "Aliya Samer", Some("AI".to_string()))
}

/// A staff member nobody else has seen before
pub fn unique_staff() -> Session {
    let suffix = unique_suffix();
    Session::new(
        format!("staff-{suffix}"),
        format!("staff{suffix}"),
        format!("Staff Member {suffix}"),
        None,
    )
}

// ============================================================================
// Requests
// ============================================================================

pub fn shift(user_name: &str, date: &str, start: &str, end: &str) -> AddShiftRequest {
    AddShiftRequest::new(user_name, date, start, end)
}

pub fn general(text: &str) -> SendMessageRequest {
    SendMessageRequest::to_channel("1", text)
}

pub fn direct(to: &Session, text: &str) -> SendMessageRequest {
    SendMessageRequest::to_user(to.id.as_str(), text)
}

pub fn broken_claw() -> SubmitReportRequest {
    SubmitReportRequest::new("Claw Machine 3", "Main Hall", "Claw does not grip")
}
