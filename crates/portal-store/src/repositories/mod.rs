//! Repository implementations
//!
//! Local implementations of the repository traits defined in portal-core.
//! Each repository owns its storage key(s) in a [`KeyValueStore`](crate::KeyValueStore).

mod announcement;
mod channel;
mod error;
mod file;
mod message;
mod report;
mod session;
mod shift;

pub use announcement::LocalAnnouncementRepository;
pub use channel::LocalChannelRepository;
pub use error::map_store_error;
pub use file::LocalFileRepository;
pub use message::LocalMessageRepository;
pub use report::LocalReportRepository;
pub use session::LocalSessionRepository;
pub use shift::LocalShiftRepository;
