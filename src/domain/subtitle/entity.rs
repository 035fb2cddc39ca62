//! File context aggregate

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::content::RawContent;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Maximum length for stored subtitle names
pub const MAX_NAME_LENGTH: usize = 255;

/// Identity of a stored subtitle artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileContextId(String);

impl FileContextId {
    /// Parse an identifier, accepting only UUIDs
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        let uuid = Uuid::parse_str(id.trim())
            .map_err(|_| DomainError::validation(format!("Invalid subtitle ID '{}'", id)))?;

        Ok(Self(uuid.to_string()))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FileContextId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FileContextId> for String {
    fn from(id: FileContextId) -> Self {
        id.0
    }
}

impl fmt::Display for FileContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for FileContextId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// One stored subtitle artifact: metadata plus, on retrieval paths, its content.
///
/// Content is write-once: once attached, the slot stays sealed even after the
/// bytes are taken away, and the seal travels with the serialized metadata.
/// The bytes themselves are never serialized; they live in the blob store
/// under the context's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContext {
    id: FileContextId,
    name: String,
    content_size: u64,
    #[serde(default)]
    content_attached: bool,
    #[serde(skip)]
    content: Option<RawContent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FileContext {
    /// Create a new context, stamping identity and timestamps
    pub fn create(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = validate_name(name.into())?;
        let now = Utc::now();

        Ok(Self {
            id: FileContextId::generate(),
            name,
            content_size: 0,
            content_attached: false,
            content: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &FileContextId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_size(&self) -> u64 {
        self.content_size
    }

    pub fn content(&self) -> Option<&RawContent> {
        self.content.as_ref()
    }

    /// Whether content was ever attached, even if since taken
    pub fn has_attached_content(&self) -> bool {
        self.content_attached
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Change the name; only the name and last-modified timestamp move
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = validate_name(name.into())?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Attach content. Succeeds at most once per instance.
    pub fn attach_content(&mut self, content: RawContent) -> Result<(), DomainError> {
        if self.content_attached {
            return Err(DomainError::validation(format!(
                "Content is already set for subtitle '{}'",
                self.id
            )));
        }

        self.content_size = content.len() as u64;
        self.content_attached = true;
        self.content = Some(content);
        Ok(())
    }

    /// Give up the attached content, leaving the metadata behind.
    ///
    /// The slot stays sealed, so the returned metadata never accepts another attach.
    pub fn take_content(self) -> (Self, Option<RawContent>) {
        let mut metadata = self;
        let content = metadata.content.take();
        (metadata, content)
    }
}

impl StorageEntity for FileContext {
    type Key = FileContextId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn validate_name(name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::validation("Subtitle name cannot be empty"));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Subtitle name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}
