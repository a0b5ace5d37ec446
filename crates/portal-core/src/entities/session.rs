//! Signed-in staff identity and the credential records behind it

use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

/// The identity of the staff member using the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: RecordId,
    pub username: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Session {
    pub fn new(
        id: impl Into<RecordId>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        department: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            full_name: full_name.into(),
            department,
        }
    }

    /// First word of the full name, used in greetings
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

/// A staff member known to the credential directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAccount {
    pub id: RecordId,
    pub username: String,
    pub full_name: String,
    pub department: Option<String>,
    pub password_hash: String,
}

impl StaffAccount {
    /// The session this account signs in as (never carries the hash)
    pub fn session(&self) -> Session {
        Session {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            department: self.department.clone(),
        }
    }
}
