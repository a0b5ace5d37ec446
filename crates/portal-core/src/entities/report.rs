//! Maintenance report entity - a device fault logged by floor staff

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Lifecycle of a maintenance report. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Open, Self::InProgress, Self::Resolved];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Maintenance report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub id: RecordId,
    pub device: String,
    pub room: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub reported_by: String,
}

impl MaintenanceReport {
    /// Create a new open report
    pub fn new(
        id: RecordId,
        device: String,
        room: String,
        description: String,
        image: Option<String>,
        reported_by: String,
    ) -> Self {
        Self {
            id,
            device,
            room,
            description,
            image,
            status: ReportStatus::Open,
            created_at: Utc::now(),
            reported_by,
        }
    }

    /// Move to `status`, returning the previous one
    pub fn set_status(&mut self, status: ReportStatus) -> ReportStatus {
        std::mem::replace(&mut self.status, status)
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.status == ReportStatus::Resolved
    }
}
