//! Conversation message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the sender of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// Message from the user.
    User,
    /// Message from the pipeline-backed assistant.
    Assistant,
}

/// A single message in a chat thread.
///
/// Content may embed markdown, including image references produced by the
/// pipeline. Assistant messages carry optional provenance tags identifying
/// the pipeline agent and step that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID format)
    pub id: String,
    /// The content of the message
    pub content: String,
    /// Who sent the message
    pub sender: MessageSender,
    /// Timestamp when the message was created (ISO 8601 format)
    pub timestamp: String,
    /// Pipeline agent that produced an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
    /// Pipeline step that produced an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    /// True only for the transient placeholder shown while a turn is in
    /// flight; cleared when the placeholder is resolved in place
    #[serde(default)]
    pub is_typing: bool,
}

impl Message {
    /// Creates a user message with a fresh id and timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender: MessageSender::User,
            timestamp: chrono::Utc::now().to_rfc3339(),
            agent_used: None,
            step_name: None,
            is_typing: false,
        }
    }

    /// Creates the pending assistant placeholder for an in-flight turn.
    pub fn typing() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: String::new(),
            sender: MessageSender::Assistant,
            timestamp: chrono::Utc::now().to_rfc3339(),
            agent_used: None,
            step_name: None,
            is_typing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let message = Message::user("hello");
        assert_eq!(message.content, "hello");
        assert_eq!(message.sender, MessageSender::User);
        assert!(!message.is_typing);
        assert!(!message.id.is_empty());
    }

    #[test]
    fn test_typing_placeholder() {
        let placeholder = Message::typing();
        assert_eq!(placeholder.sender, MessageSender::Assistant);
        assert!(placeholder.content.is_empty());
        assert!(placeholder.is_typing);
    }

    #[test]
    fn test_message_ids_are_unique() {
        assert_ne!(Message::user("a").id, Message::user("a").id);
    }
}
