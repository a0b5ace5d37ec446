//! # portal-core
//!
//! Domain layer for the arcade staff portal: entities, value objects, repository traits
//! and domain events. Nothing in here knows how records are persisted.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    default_channels, Announcement, Channel, FileContent, FileReference, MaintenanceReport,
    Message, MessageTarget, ReportStatus, Session, Shift, StaffAccount,
};
pub use error::DomainError;
pub use events::PortalEvent;
pub use traits::{
    AnnouncementRepository, ChannelRepository, FileRepository, MessageRepository, RepoResult,
    ReportRepository, SessionRepository, ShiftRepository,
};
pub use value_objects::{
    current_day_of_week, day_of_week, format_date_with_day, intervals_overlap, parse_date,
    week_dates, week_start, IdGenerator, RecordId, ShiftTime, DAY_NAMES,
};
