//! Chat thread domain model.

use super::message::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a thread before its first user turn.
pub const DEFAULT_THREAD_TITLE: &str = "New Conversation";

/// Maximum number of characters kept when deriving a title from the first
/// user turn.
const TITLE_MAX_CHARS: usize = 30;

/// Lifecycle status of a thread.
///
/// The status is advisory: an `Error` thread still accepts further turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Active,
    Completed,
    Error,
}

/// One independent conversation, locally identified and optionally bound to
/// a server-side session.
///
/// A thread is created empty and never deleted in-process. Its `session_id`
/// stays unset until the first successful response that carries one; once
/// bound it never changes. Messages are append-only, except for the in-place
/// resolution of a pending placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    /// Client-generated thread identifier (UUID format)
    pub id: String,
    /// Server-assigned session id, bound at most once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Human-readable thread title, derived from the first user turn
    pub title: String,
    /// Ordered conversation transcript (append order)
    pub messages: Vec<Message>,
    /// Timestamp when the thread was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp of the last message append (ISO 8601 format)
    pub updated_at: String,
    /// Current lifecycle status
    pub status: ThreadStatus,
}

impl ChatThread {
    /// Creates an empty thread with a fresh id and the default title.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: None,
            title: DEFAULT_THREAD_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
            status: ThreadStatus::Active,
        }
    }

    /// Returns the pending placeholder message, if a turn is in flight.
    pub fn pending_message(&self) -> Option<&Message> {
        self.messages.iter().find(|message| message.is_typing)
    }
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a thread title from the first user turn.
///
/// Input longer than 30 characters is truncated to its first 30 characters
/// followed by an ellipsis marker; shorter input is used unmodified.
pub fn derive_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_is_empty_and_active() {
        let thread = ChatThread::new();
        assert_eq!(thread.title, DEFAULT_THREAD_TITLE);
        assert!(thread.messages.is_empty());
        assert!(thread.session_id.is_none());
        assert_eq!(thread.status, ThreadStatus::Active);
        assert_eq!(thread.created_at, thread.updated_at);
    }

    #[test]
    fn test_thread_ids_are_unique() {
        assert_ne!(ChatThread::new().id, ChatThread::new().id);
    }

    #[test]
    fn test_derive_title_truncates_long_input() {
        let text = "a".repeat(35);
        let title = derive_title(&text);
        assert_eq!(title, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_derive_title_keeps_short_input() {
        assert_eq!(derive_title("ten chars!"), "ten chars!");
    }

    #[test]
    fn test_derive_title_exactly_thirty_chars() {
        let text = "b".repeat(30);
        assert_eq!(derive_title(&text), text);
    }

    #[test]
    fn test_derive_title_counts_characters_not_bytes() {
        let text = "é".repeat(35);
        let title = derive_title(&text);
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_pending_message() {
        let mut thread = ChatThread::new();
        assert!(thread.pending_message().is_none());
        thread.messages.push(Message::user("hi"));
        thread.messages.push(Message::typing());
        assert!(thread.pending_message().is_some());
    }
}
