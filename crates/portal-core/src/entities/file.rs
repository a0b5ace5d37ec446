//! Stored chat attachments
//!
//! A stored file is kept as a data URL (`data:<mime>;base64,<payload>`) so the
//! blob describes its own content type. Messages reference it by a
//! `local_file_<id>` string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Prefix of references produced by local file storage
pub const LOCAL_FILE_PREFIX: &str = "local_file_";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Reference to a stored file, as carried in `Message::file_url`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference(RecordId);

impl FileReference {
    pub fn new(file_id: RecordId) -> Self {
        Self(file_id)
    }

    /// Recognise a reference produced by local storage; anything else
    /// (e.g. an `https://` URL from the hosted backend) yields `None`
    pub fn parse(reference: &str) -> Option<Self> {
        reference
            .strip_prefix(LOCAL_FILE_PREFIX)
            .filter(|id| !id.is_empty())
            .map(|id| Self(RecordId::from(id)))
    }

    /// The generated id embedded in the reference
    #[inline]
    pub fn file_id(&self) -> &RecordId {
        &self.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LOCAL_FILE_PREFIX}{}", self.0)
    }
}

/// Raw file content together with its MIME type
#[derive(Clone, PartialEq, Eq)]
pub struct FileContent {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileContent {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let content_type = content_type.into();
        Self {
            content_type: if content_type.trim().is_empty() {
                DEFAULT_CONTENT_TYPE.to_string()
            } else {
                content_type
            },
            bytes: bytes.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Encode as a base64 data URL
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }

    /// Decode a base64 data URL produced by [`FileContent::to_data_url`]
    pub fn from_data_url(data_url: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::ValidationError(format!("invalid data URL: {reason}"));

        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| invalid("missing data: scheme"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing payload separator"))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 payloads are supported"))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self::new(content_type, bytes))
    }
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContent")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
