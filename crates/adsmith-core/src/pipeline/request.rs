//! Turn submission request body.

use serde::{Deserialize, Serialize};

/// Body of a turn submission.
///
/// Omission semantics matter on this wire: leaving out `session_id` tells
/// the pipeline to start a new server-side session, and leaving out `final`
/// (rather than sending `false`) signals a non-final turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGenerationRequest {
    /// The user's text for this turn
    pub initial_prompt: String,
    /// Always present; empty when the turn carries no feedback
    #[serde(default)]
    pub feedback: String,
    /// Id of the local user
    pub user_id: String,
    /// Present only when continuing an existing server-side session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Present only when true
    #[serde(rename = "final", default, skip_serializing_if = "Option::is_none")]
    pub finalize: Option<bool>,
}

impl AdGenerationRequest {
    /// Creates a request for a new-session turn with no feedback.
    pub fn new(initial_prompt: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            initial_prompt: initial_prompt.into(),
            feedback: String::new(),
            user_id: user_id.into(),
            session_id: None,
            finalize: None,
        }
    }

    /// Attaches feedback text.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    /// Continues an existing server-side session.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Marks the turn as final. A `false` value keeps the field off the
    /// wire entirely.
    pub fn finalized(mut self, finalize: bool) -> Self {
        self.finalize = finalize.then_some(true);
        self
    }
}
