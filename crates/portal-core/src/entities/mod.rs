//! Domain entities - core business objects

mod announcement;
mod channel;
mod file;
mod message;
mod report;
mod session;
mod shift;

pub use announcement::Announcement;
pub use channel::{default_channels, Channel};
pub use file::{FileContent, FileReference};
pub use message::{Message, MessageTarget};
pub use report::{MaintenanceReport, ReportStatus};
pub use session::{Session, StaffAccount};
pub use shift::Shift;
