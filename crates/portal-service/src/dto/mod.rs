//! Data transfer objects for portal requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for operation inputs
//! - Response DTOs assembled from several repository reads

pub mod requests;
pub mod responses;

pub use requests::{
    AddShiftRequest, PostAnnouncementRequest, SendMessageRequest, SignInRequest,
    SubmitReportRequest, MAX_MESSAGE_CHARS,
};
pub use responses::{DaySchedule, ReportCounts, WeekSchedule};
