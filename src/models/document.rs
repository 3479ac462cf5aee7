use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque document identifier, stable for the document's lifetime.
///
/// A dedicated newtype so a document id cannot be passed where a
/// conversation id is expected, or the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a chat conversation scoped to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a conversation associated with a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRef {
    #[serde(rename = "conversationid")]
    pub conversation_id: ConversationId,
}

/// Document processing lifecycle as reported by the document service.
///
/// Progression is one-directional: `Uploaded` → `Processing` → `Ready`.
/// The service never regresses a document; deletion removes it outright
/// rather than adding a fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Ready,
    /// Carrier for status values this client does not recognize, so one
    /// bad record cannot fail deserialization of a whole listing payload.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentStatus::Uploaded => "UPLOADED",
            DocumentStatus::Processing => "PROCESSING",
            DocumentStatus::Ready => "READY",
            DocumentStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A user-uploaded document tracked through the ingestion pipeline.
///
/// Supplied fully populated by the caller; this crate never fetches it.
/// Serde names follow the document service's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "documentid")]
    pub id: DocumentId,
    pub filename: String,
    #[serde(rename = "pages")]
    pub page_count: u32,
    #[serde(rename = "filesize")]
    pub size_bytes: u64,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "docstatus")]
    pub status: DocumentStatus,
    #[serde(default)]
    pub conversations: Vec<ConversationRef>,
}

impl Document {
    /// Navigation target for the default chat view: the document paired
    /// with its first conversation. `None` only when no conversation has
    /// been created yet.
    pub fn conversation_path(&self) -> Option<String> {
        self.conversations
            .first()
            .map(|c| format!("/doc/{}/{}/", self.id, c.conversation_id))
    }
}
