//! Message entity - a chat message posted to a channel or sent to one person

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::value_objects::RecordId;

/// Where a message is delivered. Persisted as either a `channel_id` or a
/// `recipient_id` field on the message, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum MessageTarget {
    Channel { channel_id: RecordId },
    Direct { recipient_id: RecordId },
}

/// Both target keys as they appear on the wire
#[derive(Deserialize)]
struct RawTarget {
    #[serde(default)]
    channel_id: Option<RecordId>,
    #[serde(default)]
    recipient_id: Option<RecordId>,
}

impl<'de> Deserialize<'de> for MessageTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTarget::deserialize(deserializer)?;
        match (raw.channel_id, raw.recipient_id) {
            (Some(channel_id), None) => Ok(Self::Channel { channel_id }),
            (None, Some(recipient_id)) => Ok(Self::Direct { recipient_id }),
            (Some(_), Some(_)) => Err(de::Error::custom(
                "message has both channel_id and recipient_id",
            )),
            (None, None) => Err(de::Error::custom(
                "message needs a channel_id or a recipient_id",
            )),
        }
    }
}

impl MessageTarget {
    pub fn channel(channel_id: impl Into<RecordId>) -> Self {
        Self::Channel {
            channel_id: channel_id.into(),
        }
    }

    pub fn direct(recipient_id: impl Into<RecordId>) -> Self {
        Self::Direct {
            recipient_id: recipient_id.into(),
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub sender_id: RecordId,
    pub sender_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub is_emergency: bool,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub target: MessageTarget,
}

impl Message {
    /// Create a new plain-text message stamped with the current time
    pub fn new(
        id: RecordId,
        sender_id: RecordId,
        sender_name: String,
        message: String,
        target: MessageTarget,
    ) -> Self {
        Self {
            id,
            sender_id,
            sender_name,
            message,
            file_url: None,
            file_type: None,
            is_emergency: false,
            created_at: Utc::now(),
            target,
        }
    }

    #[inline]
    pub fn channel_id(&self) -> Option<&RecordId> {
        match &self.target {
            MessageTarget::Channel { channel_id } => Some(channel_id),
            MessageTarget::Direct { .. } => None,
        }
    }

    #[inline]
    pub fn recipient_id(&self) -> Option<&RecordId> {
        match &self.target {
            MessageTarget::Direct { recipient_id } => Some(recipient_id),
            MessageTarget::Channel { .. } => None,
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.target, MessageTarget::Direct { .. })
    }

    /// Direct message exchanged between `a` and `b`, in either direction
    pub fn is_between(&self, a: &RecordId, b: &RecordId) -> bool {
        match self.recipient_id() {
            Some(recipient) => {
                (&self.sender_id == a && recipient == b) || (&self.sender_id == b && recipient == a)
            }
            None => false,
        }
    }

    #[inline]
    pub fn has_attachment(&self) -> bool {
        self.file_url.is_some()
    }

    /// Notification preview: at most `max_chars` characters, `...` appended when cut
    pub fn preview(&self, max_chars: usize) -> String {
        match self.message.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.message[..cut]),
            None => self.message.clone(),
        }
    }
}
