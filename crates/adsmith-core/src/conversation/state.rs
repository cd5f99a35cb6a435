//! Root conversation state.

use super::artifact::Artifact;
use super::thread::ChatThread;
use serde::{Deserialize, Serialize};

/// User id used when the embedding layer does not supply one.
pub const DEFAULT_USER_ID: &str = "default_user";

/// The complete client-side conversation state.
///
/// The current thread is held as an id-keyed reference into `threads`, never
/// as a second copy, so the selected thread can never diverge from its entry
/// in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Id of the selected thread, if any
    pub current_thread_id: Option<String>,
    /// All threads, newest first
    pub threads: Vec<ChatThread>,
    /// All artifacts across threads and sessions, newest first
    pub artifacts: Vec<Artifact>,
    /// True exactly while a turn is in flight
    pub is_loading: bool,
    /// Id of the local user, sent with every turn
    pub user_id: String,
}

impl ConversationState {
    /// Creates an empty state for the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            current_thread_id: None,
            threads: Vec::new(),
            artifacts: Vec::new(),
            is_loading: false,
            user_id: user_id.into(),
        }
    }

    /// Looks up a thread by id.
    pub fn thread(&self, thread_id: &str) -> Option<&ChatThread> {
        self.threads.iter().find(|thread| thread.id == thread_id)
    }

    /// Resolves the selected thread against the thread collection.
    ///
    /// Returns `None` when nothing is selected or the selected id has no
    /// matching entry.
    pub fn current_thread(&self) -> Option<&ChatThread> {
        self.thread(self.current_thread_id.as_deref()?)
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}
