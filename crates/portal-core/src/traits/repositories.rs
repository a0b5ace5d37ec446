//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs and the storage layer provides the
//! implementation. The local implementations keep JSON collections in a
//! key-value store; a hosted-table backend plugs into the same traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    Announcement, Channel, FileContent, FileReference, MaintenanceReport, Message, ReportStatus,
    Session, Shift,
};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the persisted session. Unparsable data yields `DomainError::CorruptState`.
    async fn load(&self) -> RepoResult<Option<Session>>;

    /// Persist the session, replacing any previous one
    async fn save(&self, session: &Session) -> RepoResult<()>;

    /// Remove the persisted session. Clearing an empty store is not an error.
    async fn clear(&self) -> RepoResult<()>;
}

// ============================================================================
// Shift Repository
// ============================================================================

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Find shift by ID
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Shift>>;

    /// All shifts on `date`, in insertion order
    async fn find_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Shift>>;

    /// Shifts of one person on one day, in insertion order
    async fn find_for_user_on(&self, user_name: &str, date: NaiveDate) -> RepoResult<Vec<Shift>>;

    /// Every stored shift, in insertion order
    async fn list(&self) -> RepoResult<Vec<Shift>>;

    /// Append a shift. Fails with `DomainError::Overlap` when it conflicts with
    /// an existing shift of the same person on the same day; nothing is stored then.
    async fn create(&self, shift: &Shift) -> RepoResult<()>;

    /// Delete a shift, returning whether it existed
    async fn delete(&self, id: &RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// List all channels, in seed order
    async fn list(&self) -> RepoResult<Vec<Channel>>;

    /// Find channel by ID
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Channel>>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Message>>;

    /// Messages posted to a channel, ascending by `created_at` with ties in insertion order
    async fn find_by_channel(&self, channel_id: &RecordId) -> RepoResult<Vec<Message>>;

    /// Direct messages exchanged between two people in either direction,
    /// ascending by `created_at`
    async fn find_direct(&self, a: &RecordId, b: &RecordId) -> RepoResult<Vec<Message>>;

    /// Append a message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Number of stored messages
    async fn count(&self) -> RepoResult<usize>;
}

// ============================================================================
// File Repository
// ============================================================================

#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Store file content under `id` and return the reference messages carry
    async fn store(&self, id: &RecordId, content: &FileContent) -> RepoResult<FileReference>;

    /// Load stored content, `None` when no blob exists for the reference
    async fn load(&self, reference: &FileReference) -> RepoResult<Option<FileContent>>;
}

// ============================================================================
// Maintenance Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// All reports, newest first
    async fn list(&self) -> RepoResult<Vec<MaintenanceReport>>;

    /// Find report by ID
    async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MaintenanceReport>>;

    /// Store a new report ahead of every existing one
    async fn create(&self, report: &MaintenanceReport) -> RepoResult<()>;

    /// Change the status of a report. Fails with `DomainError::ReportNotFound`
    /// when no report has this id.
    async fn update_status(
        &self,
        id: &RecordId,
        status: ReportStatus,
    ) -> RepoResult<MaintenanceReport>;
}

// ============================================================================
// Announcement Repository
// ============================================================================

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// All announcements, newest first
    async fn list(&self) -> RepoResult<Vec<Announcement>>;

    /// Store a new announcement ahead of every existing one
    async fn create(&self, announcement: &Announcement) -> RepoResult<()>;
}
