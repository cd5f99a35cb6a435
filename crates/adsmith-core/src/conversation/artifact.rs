//! Typed artifacts extracted from pipeline responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of structured byproduct a pipeline response produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Enhanced version of the user's prompt
    Prompt,
    /// Generated ad copy
    Post,
    /// Compliance check result
    Compliance,
    /// Image prompt or rendered image
    Image,
}

/// A structured byproduct of a pipeline response, retained independently of
/// the transcript.
///
/// Artifacts are immutable once created and the collection holding them is
/// append-only. The `message_id` back-reference identifies the assistant
/// message that produced the artifact; it is used for lookup only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique artifact identifier (UUID format)
    pub id: String,
    /// Artifact kind
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Display title
    pub title: String,
    /// Artifact content (may embed markdown)
    pub content: String,
    /// Timestamp when the artifact was extracted (ISO 8601 format)
    pub timestamp: String,
    /// Session the producing response belonged to
    pub session_id: String,
    /// Assistant message that produced this artifact
    pub message_id: String,
}

impl Artifact {
    /// Creates an artifact with a fresh id and timestamp.
    pub fn new(
        kind: ArtifactKind,
        title: impl Into<String>,
        content: impl Into<String>,
        session_id: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: session_id.into(),
            message_id: message_id.into(),
        }
    }
}
