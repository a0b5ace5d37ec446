//! Portal services
//!
//! Each service is a short-lived struct borrowing the [`ServiceContext`];
//! the context owns repositories, the credential backend and the event
//! dispatcher.

pub mod announcement;
pub mod chat;
pub mod context;
pub mod credentials;
pub mod error;
pub mod notification;
pub mod report;
pub mod session;
pub mod shift;

// Re-export all services for convenience
pub use announcement::AnnouncementService;
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use credentials::{CredentialBackend, SharedPassphrase, StaffDirectory};
pub use error::{ServiceError, ServiceResult};
pub use notification::{
    Alert, AlertKind, AlertPriority, DirectMessageAlert, NotificationCenter, PREVIEW_CHARS,
};
pub use report::ReportService;
pub use session::SessionService;
pub use shift::ShiftService;
