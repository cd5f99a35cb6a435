//! Event-sourced conversation store.
//!
//! All state transitions go through [`reduce`], a total function from
//! `(state, event)` to the next state. It performs no I/O and cannot fail
//! partially: every event either applies fully or leaves the state
//! unchanged.

use super::event::{ConversationEvent, MessagePatch, ThreadPatch};
use super::message::Message;
use super::state::ConversationState;
use super::thread::ChatThread;

/// Holds the conversation state and applies events to it.
///
/// Events apply synchronously and atomically with respect to the single
/// logical thread driving the client, so no two events can interleave
/// mid-application.
#[derive(Debug, Default)]
pub struct ConversationStore {
    state: ConversationState,
}

impl ConversationStore {
    /// Creates a store with an empty state for the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            state: ConversationState::new(user_id),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Applies a single event.
    pub fn apply(&mut self, event: ConversationEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }
}

/// Applies one event to the state and returns the next state.
pub fn reduce(mut state: ConversationState, event: ConversationEvent) -> ConversationState {
    match event {
        ConversationEvent::SetLoading { loading } => {
            state.is_loading = loading;
        }
        ConversationEvent::SetCurrentThread { thread_id } => {
            state.current_thread_id = thread_id;
        }
        ConversationEvent::AddThread { thread } => {
            state.current_thread_id = Some(thread.id.clone());
            state.threads.insert(0, thread);
        }
        ConversationEvent::UpdateThread { thread_id, patch } => {
            if let Some(thread) = find_thread(&mut state, &thread_id) {
                apply_thread_patch(thread, patch);
            }
        }
        ConversationEvent::AppendMessage { thread_id, message } => {
            if let Some(thread) = find_thread(&mut state, &thread_id) {
                thread.messages.push(message);
                thread.updated_at = chrono::Utc::now().to_rfc3339();
            }
        }
        ConversationEvent::UpdateMessage {
            thread_id,
            message_id,
            patch,
        } => {
            if let Some(thread) = find_thread(&mut state, &thread_id)
                && let Some(message) = thread
                    .messages
                    .iter_mut()
                    .find(|message| message.id == message_id)
            {
                apply_message_patch(message, patch);
            }
        }
        ConversationEvent::AddArtifact { artifact } => {
            state.artifacts.insert(0, artifact);
        }
        ConversationEvent::SetThreads { threads } => {
            state.threads = threads;
        }
        ConversationEvent::SetArtifacts { artifacts } => {
            state.artifacts = artifacts;
        }
    }
    state
}

fn find_thread<'a>(
    state: &'a mut ConversationState,
    thread_id: &str,
) -> Option<&'a mut ChatThread> {
    state
        .threads
        .iter_mut()
        .find(|thread| thread.id == thread_id)
}

fn apply_thread_patch(thread: &mut ChatThread, patch: ThreadPatch) {
    if let Some(title) = patch.title {
        thread.title = title;
    }
    if let Some(session_id) = patch.session_id {
        // Bound at most once; later values are ignored.
        if thread.session_id.is_none() {
            thread.session_id = Some(session_id);
        }
    }
    if let Some(status) = patch.status {
        thread.status = status;
    }
}

fn apply_message_patch(message: &mut Message, patch: MessagePatch) {
    if let Some(id) = patch.id {
        message.id = id;
    }
    if let Some(content) = patch.content {
        message.content = content;
    }
    if let Some(agent_used) = patch.agent_used {
        message.agent_used = Some(agent_used);
    }
    if let Some(step_name) = patch.step_name {
        message.step_name = Some(step_name);
    }
    if let Some(is_typing) = patch.is_typing {
        message.is_typing = is_typing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::artifact::{Artifact, ArtifactKind};
    use crate::conversation::thread::ThreadStatus;

    fn store_with_thread() -> (ConversationStore, String) {
        let mut store = ConversationStore::default();
        let thread = ChatThread::new();
        let thread_id = thread.id.clone();
        store.apply(ConversationEvent::AddThread { thread });
        (store, thread_id)
    }

    #[test]
    fn test_add_thread_prepends_and_selects() {
        let (mut store, first_id) = store_with_thread();
        let second = ChatThread::new();
        let second_id = second.id.clone();
        store.apply(ConversationEvent::AddThread { thread: second });

        let state = store.state();
        assert_eq!(state.threads.len(), 2);
        assert_eq!(state.threads[0].id, second_id);
        assert_eq!(state.threads[1].id, first_id);
        assert_eq!(state.current_thread_id.as_deref(), Some(second_id.as_str()));
    }

    #[test]
    fn test_update_thread_reflects_in_current_thread() {
        let (mut store, thread_id) = store_with_thread();
        store.apply(ConversationEvent::UpdateThread {
            thread_id: thread_id.clone(),
            patch: ThreadPatch::title("Summer campaign"),
        });

        // The id-keyed lookup guarantees the selected thread and its entry
        // in the collection are the same value.
        let state = store.state();
        let current = state.current_thread().unwrap();
        assert_eq!(current.title, "Summer campaign");
        assert_eq!(current, state.thread(&thread_id).unwrap());
    }

    #[test]
    fn test_session_id_binds_at_most_once() {
        let (mut store, thread_id) = store_with_thread();
        store.apply(ConversationEvent::UpdateThread {
            thread_id: thread_id.clone(),
            patch: ThreadPatch::session_id("session-1"),
        });
        store.apply(ConversationEvent::UpdateThread {
            thread_id: thread_id.clone(),
            patch: ThreadPatch::session_id("session-2"),
        });

        let thread = store.state().thread(&thread_id).unwrap();
        assert_eq!(thread.session_id.as_deref(), Some("session-1"));
    }

    #[test]
    fn test_append_message_bumps_updated_at() {
        let (mut store, thread_id) = store_with_thread();
        // Backdate the thread so the bump is observable.
        {
            let mut threads = store.state().threads.clone();
            threads[0].updated_at = "2000-01-01T00:00:00+00:00".to_string();
            store.apply(ConversationEvent::SetThreads { threads });
        }
        store.apply(ConversationEvent::AppendMessage {
            thread_id: thread_id.clone(),
            message: Message::user("hello"),
        });

        let thread = store.state().thread(&thread_id).unwrap();
        assert_eq!(thread.messages.len(), 1);
        assert!(thread.updated_at.as_str() > "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_messages_keep_append_order() {
        let (mut store, thread_id) = store_with_thread();
        for content in ["one", "two", "three"] {
            store.apply(ConversationEvent::AppendMessage {
                thread_id: thread_id.clone(),
                message: Message::user(content),
            });
        }
        let contents: Vec<&str> = store.state().thread(&thread_id).unwrap().messages
            .iter()
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[test]
    fn test_update_message_resolves_placeholder_in_place() {
        let (mut store, thread_id) = store_with_thread();
        let placeholder = Message::typing();
        let placeholder_id = placeholder.id.clone();
        store.apply(ConversationEvent::AppendMessage {
            thread_id: thread_id.clone(),
            message: placeholder,
        });
        store.apply(ConversationEvent::UpdateMessage {
            thread_id: thread_id.clone(),
            message_id: placeholder_id.clone(),
            patch: MessagePatch {
                id: Some("display-1".to_string()),
                content: Some("Here is your ad.".to_string()),
                agent_used: Some("ad_generator".to_string()),
                step_name: Some("generate_ad".to_string()),
                is_typing: Some(false),
            },
        });

        let thread = store.state().thread(&thread_id).unwrap();
        assert_eq!(thread.messages.len(), 1);
        let message = &thread.messages[0];
        assert_eq!(message.id, "display-1");
        assert_eq!(message.content, "Here is your ad.");
        assert_eq!(message.agent_used.as_deref(), Some("ad_generator"));
        assert!(!message.is_typing);
        assert!(thread.pending_message().is_none());
    }

    #[test]
    fn test_unknown_thread_is_noop() {
        let (mut store, _) = store_with_thread();
        let before = store.state().clone();
        store.apply(ConversationEvent::AppendMessage {
            thread_id: "missing".to_string(),
            message: Message::user("dropped"),
        });
        store.apply(ConversationEvent::UpdateThread {
            thread_id: "missing".to_string(),
            patch: ThreadPatch::title("dropped"),
        });
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_unknown_message_is_noop() {
        let (mut store, thread_id) = store_with_thread();
        let before = store.state().clone();
        store.apply(ConversationEvent::UpdateMessage {
            thread_id,
            message_id: "missing".to_string(),
            patch: MessagePatch {
                content: Some("dropped".to_string()),
                ..MessagePatch::default()
            },
        });
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_add_artifact_prepends() {
        let mut store = ConversationStore::default();
        store.apply(ConversationEvent::AddArtifact {
            artifact: Artifact::new(ArtifactKind::Prompt, "first", "c", "s", "m"),
        });
        store.apply(ConversationEvent::AddArtifact {
            artifact: Artifact::new(ArtifactKind::Post, "second", "c", "s", "m"),
        });

        let artifacts = &store.state().artifacts;
        assert_eq!(artifacts[0].title, "second");
        assert_eq!(artifacts[1].title, "first");
    }

    #[test]
    fn test_set_loading() {
        let mut store = ConversationStore::default();
        store.apply(ConversationEvent::SetLoading { loading: true });
        assert!(store.state().is_loading);
        store.apply(ConversationEvent::SetLoading { loading: false });
        assert!(!store.state().is_loading);
    }

    #[test]
    fn test_set_current_thread_and_clear() {
        let (mut store, thread_id) = store_with_thread();
        store.apply(ConversationEvent::SetCurrentThread { thread_id: None });
        assert!(store.state().current_thread().is_none());
        store.apply(ConversationEvent::SetCurrentThread {
            thread_id: Some(thread_id.clone()),
        });
        assert_eq!(store.state().current_thread().unwrap().id, thread_id);
    }

    #[test]
    fn test_bulk_setters_replace_collections() {
        let (mut store, _) = store_with_thread();
        store.apply(ConversationEvent::SetThreads { threads: Vec::new() });
        store.apply(ConversationEvent::SetArtifacts {
            artifacts: vec![Artifact::new(ArtifactKind::Image, "t", "c", "s", "m")],
        });
        assert!(store.state().threads.is_empty());
        assert_eq!(store.state().artifacts.len(), 1);
    }

    #[test]
    fn test_event_round_trips_through_serde() {
        let event = ConversationEvent::UpdateThread {
            thread_id: "t-1".to_string(),
            patch: ThreadPatch::status(ThreadStatus::Error),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"update_thread\""));
        let decoded: ConversationEvent = serde_json::from_str(&json).unwrap();
        let state = reduce(
            reduce(
                ConversationState::default(),
                ConversationEvent::AddThread {
                    thread: ChatThread {
                        id: "t-1".to_string(),
                        ..ChatThread::new()
                    },
                },
            ),
            decoded,
        );
        assert_eq!(state.thread("t-1").unwrap().status, ThreadStatus::Error);
    }
}
