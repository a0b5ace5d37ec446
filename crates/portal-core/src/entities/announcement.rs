//! Announcement entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Staff-wide announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(
        id: RecordId,
        title: String,
        message: String,
        image_url: Option<String>,
        author_name: String,
    ) -> Self {
        Self {
            id,
            title,
            message,
            image_url,
            author_name,
            created_at: Utc::now(),
        }
    }
}
