//! The closed set of mutations accepted by the conversation store.

use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use super::message::Message;
use super::thread::{ChatThread, ThreadStatus};

/// High-level events that can be applied to the conversation state.
///
/// Every mutation of the state goes through one of these variants; there is
/// no other write path. Events targeting an unknown thread or message id
/// leave the state unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// Marks a turn as in flight (or not).
    SetLoading { loading: bool },
    /// Selects a thread by id, or clears the selection.
    SetCurrentThread { thread_id: Option<String> },
    /// Prepends a thread and makes it current.
    AddThread { thread: ChatThread },
    /// Merges fields into the matching thread.
    UpdateThread {
        thread_id: String,
        patch: ThreadPatch,
    },
    /// Appends a message to the matching thread and bumps its timestamp.
    AppendMessage { thread_id: String, message: Message },
    /// Merges fields into the matching message.
    UpdateMessage {
        thread_id: String,
        message_id: String,
        patch: MessagePatch,
    },
    /// Prepends an artifact to the collection.
    AddArtifact { artifact: Artifact },
    /// Replaces the thread collection (hydration path).
    SetThreads { threads: Vec<ChatThread> },
    /// Replaces the artifact collection (hydration path).
    SetArtifacts { artifacts: Vec<Artifact> },
}

/// Partial update for a thread. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// A session id is bound at most once; a patch against an
    /// already-bound thread is ignored by the reducer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ThreadStatus>,
}

impl ThreadPatch {
    /// Patch that sets the thread title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch that binds the server-assigned session id.
    pub fn session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::default()
        }
    }

    /// Patch that sets the lifecycle status.
    pub fn status(status: ThreadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Partial update for a message. Absent fields are left untouched.
///
/// Used to resolve a pending placeholder in place; the `id` field lets the
/// resolution replace the placeholder's identity with a fresh display id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_typing: Option<bool>,
}
