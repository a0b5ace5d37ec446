//! Channel entity - a named conversation topic shared by all staff

use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// Chat channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Channel {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            department: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Channel name as shown in the sidebar, e.g. `#general`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("#{}", self.name)
    }

    /// Visible to every department
    #[inline]
    #[must_use]
    pub fn is_open_to_all(&self) -> bool {
        matches!(self.department.as_deref(), None | Some("All"))
    }
}

/// Channels seeded on first run
#[must_use]
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel::new("1", "general")
            .with_description("General team discussions")
            .with_department("All"),
        Channel::new("2", "ai-team")
            .with_description("AI department discussions")
            .with_department("AI"),
        Channel::new("3", "announcements")
            .with_description("Official announcements only")
            .with_department("All"),
        Channel::new("4", "tech-support")
            .with_description("Technical support and troubleshooting")
            .with_department("All"),
    ]
}
