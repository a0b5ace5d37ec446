//! Portal events - emitted after a repository mutation has been persisted
//!
//! These events are used for:
//! - Simulated real-time updates to chat listeners
//! - Deriving user-facing alerts in the notification bridge

use serde::{Deserialize, Serialize};

use crate::entities::{Announcement, MaintenanceReport, Message, ReportStatus, Shift};
use crate::value_objects::RecordId;

/// All portal events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortalEvent {
    // =========================================================================
    // Chat Events
    // =========================================================================
    MessageSent(Message),

    // =========================================================================
    // Schedule Events
    // =========================================================================
    ShiftAdded(Shift),
    ShiftDeleted { id: RecordId },

    // =========================================================================
    // Board Events
    // =========================================================================
    AnnouncementPosted(Announcement),
    ReportSubmitted(MaintenanceReport),
    ReportStatusChanged { id: RecordId, status: ReportStatus },
}

impl PortalEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageSent(_) => "MESSAGE_SENT",
            Self::ShiftAdded(_) => "SHIFT_ADDED",
            Self::ShiftDeleted { .. } => "SHIFT_DELETED",
            Self::AnnouncementPosted(_) => "ANNOUNCEMENT_POSTED",
            Self::ReportSubmitted(_) => "REPORT_SUBMITTED",
            Self::ReportStatusChanged { .. } => "REPORT_STATUS_CHANGED",
        }
    }

    /// The chat message carried by this event, if any
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::MessageSent(message) => Some(message),
            _ => None,
        }
    }
}
