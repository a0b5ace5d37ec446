//! Storage keys. Each key is owned by exactly one repository.

/// Signed-in session
pub const SESSION_KEY: &str = "staff_auth";

/// `[Shift]`
pub const SHIFTS_KEY: &str = "arcade_shifts";

/// `[Message]`
pub const MESSAGES_KEY: &str = "arcade_chat_messages";

/// `[Channel]`
pub const CHANNELS_KEY: &str = "arcade_chat_channels";

/// Prefix of per-file keys, followed by the file id
pub const FILE_KEY_PREFIX: &str = "chat_file_";

/// `[MaintenanceReport]`
pub const REPORTS_KEY: &str = "pixoul_maintenance_reports";

/// `[Announcement]`
pub const ANNOUNCEMENTS_KEY: &str = "pixoul_announcements";
