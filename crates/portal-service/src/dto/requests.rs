//! Request DTOs for portal operations
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use portal_core::entities::MessageTarget;
use portal_core::{parse_date, DomainError, ShiftTime};

/// Longest chat message accepted
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Required text fields must hold more than whitespace
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Field must not be blank".into()));
    }
    Ok(())
}

// ============================================================================
// Session Requests
// ============================================================================

/// Sign-in request. In passphrase mode `identifier` is the staff member's
/// full name and `secret` the shared passphrase.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub secret: String,
}

impl SignInRequest {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

// ============================================================================
// Shift Requests
// ============================================================================

/// Add shift request, with the date and times in their wire formats
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddShiftRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub user_name: String,

    /// `YYYY-MM-DD`
    pub date: String,

    /// `HH:mm`
    pub start_time: String,

    /// `HH:mm`
    pub end_time: String,
}

impl AddShiftRequest {
    pub fn new(
        user_name: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Parse the date and both times
    pub fn parse(&self) -> Result<(NaiveDate, ShiftTime, ShiftTime), DomainError> {
        Ok((
            parse_date(&self.date)?,
            ShiftTime::parse(&self.start_time)?,
            ShiftTime::parse(&self.end_time)?,
        ))
    }
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_message_body"))]
pub struct SendMessageRequest {
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    #[serde(default)]
    pub message: String,

    /// `local_file_<id>` reference or an external URL
    pub file_url: Option<String>,

    pub file_type: Option<String>,

    #[serde(default)]
    pub is_emergency: bool,

    #[serde(flatten)]
    pub target: MessageTarget,
}

impl SendMessageRequest {
    /// Message posted to a channel
    pub fn to_channel(channel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(MessageTarget::channel(channel_id.into()), message)
    }

    /// Direct message to one staff member
    pub fn to_user(recipient_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(MessageTarget::direct(recipient_id.into()), message)
    }

    fn new(target: MessageTarget, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file_url: None,
            file_type: None,
            is_emergency: false,
            target,
        }
    }

    pub fn with_file(mut self, file_url: impl Into<String>, file_type: impl Into<String>) -> Self {
        self.file_url = Some(file_url.into());
        self.file_type = Some(file_type.into());
        self
    }

    pub fn emergency(mut self) -> Self {
        self.is_emergency = true;
        self
    }
}

/// Text may only be blank when a file is attached
fn validate_message_body(request: &SendMessageRequest) -> Result<(), ValidationError> {
    if request.message.trim().is_empty() && request.file_url.is_none() {
        return Err(
            ValidationError::new("empty_message").with_message("Message must not be empty".into())
        );
    }
    Ok(())
}

// ============================================================================
// Board Requests
// ============================================================================

/// Maintenance report draft
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReportRequest {
    #[validate(
        length(max = 100, message = "Device must be at most 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub device: String,

    #[validate(
        length(max = 100, message = "Room must be at most 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub room: String,

    #[validate(
        length(max = 2000, message = "Description must be at most 2000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub description: String,

    /// Stored file reference or URL of a photo of the fault
    pub image: Option<String>,
}

impl SubmitReportRequest {
    pub fn new(
        device: impl Into<String>,
        room: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            room: room.into(),
            description: description.into(),
            image: None,
        }
    }
}

/// Announcement draft
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostAnnouncementRequest {
    #[validate(
        length(max = 200, message = "Title must be at most 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(max = 5000, message = "Message must be at most 5000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub message: String,

    pub image_url: Option<String>,
}

impl PostAnnouncementRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            image_url: None,
        }
    }
}
