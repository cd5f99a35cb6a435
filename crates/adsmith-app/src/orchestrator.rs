//! Turn orchestration.
//!
//! Drives one user turn end to end: optimistic user message, pending
//! placeholder, a single transport call, and resolution into either the
//! assistant reply plus extracted artifacts or an error-styled message.
//! Every mutation goes through the conversation store's event set; the
//! orchestrator never touches state directly.

use std::sync::Arc;

use adsmith_core::conversation::{
    ChatThread, ConversationEvent, ConversationState, ConversationStore, Message, MessagePatch,
    ThreadPatch, ThreadStatus, derive_title,
};
use adsmith_core::location::{self, AddressableLocation};
use adsmith_core::pipeline::{AdGenerationRequest, AdGenerationResponse, AdPipeline};
use adsmith_transport::{HttpPipelineClient, PipelineConfig};
use uuid::Uuid;

use crate::extract::extract_artifacts;

/// Provenance tags for assistant replies produced by the pipeline.
const AGENT_USED: &str = "ad_generator";
const STEP_NAME: &str = "generate_ad";

/// Reply shown when a successful response carries no copy and no prompt.
const FALLBACK_REPLY: &str = "Ad generation completed.";

/// Error text shown when a failure response carries no error field.
const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Reply shown when the transport call itself fails.
const TRANSPORT_APOLOGY: &str =
    "I apologize, but I encountered an error while processing your request. Please try again.";

/// Sequences one user turn against the conversation store and the pipeline.
///
/// The orchestrator is single-threaded and cooperative: it suspends only at
/// the transport call, and `is_loading` on the state is the only observable
/// marker of an in-flight turn. `&mut self` makes overlapping turns
/// unrepresentable; the embedding layer is still expected to gate input on
/// `is_loading`.
pub struct TurnOrchestrator {
    store: ConversationStore,
    pipeline: Arc<dyn AdPipeline>,
    location: Arc<dyn AddressableLocation>,
}

impl TurnOrchestrator {
    /// Creates an orchestrator over the given pipeline and location, with an
    /// empty store for the default user.
    pub fn new(pipeline: Arc<dyn AdPipeline>, location: Arc<dyn AddressableLocation>) -> Self {
        Self {
            store: ConversationStore::default(),
            pipeline,
            location,
        }
    }

    /// Creates an orchestrator over the hosted HTTP pipeline.
    pub fn over_http(config: PipelineConfig, location: Arc<dyn AddressableLocation>) -> Self {
        Self::new(Arc::new(HttpPipelineClient::new(config)), location)
    }

    /// Replaces the (still empty) store with one for the given user.
    ///
    /// Intended directly after construction; any accumulated state is
    /// discarded.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.store = ConversationStore::new(user_id);
        self
    }

    /// Returns the current conversation state.
    pub fn state(&self) -> &ConversationState {
        self.store.state()
    }

    /// Applies a store event directly.
    ///
    /// Escape hatch for the embedding layer (hydration, selection handled
    /// outside the provided operations).
    pub fn apply(&mut self, event: ConversationEvent) {
        self.store.apply(event);
    }

    /// Reads a session id already present in the location at process start.
    ///
    /// Restoring a server session from a shared link is not implemented;
    /// the parameter is only reported here and left in place.
    pub fn startup_session_hint(&self) -> Option<String> {
        let hint = location::session_id(self.location.as_ref());
        if let Some(session_id) = &hint {
            tracing::info!(
                "[TurnOrchestrator] location carries session_id {session_id}; no matching thread in memory, leaving it in place"
            );
        }
        hint
    }

    /// Creates a fresh thread, makes it current, and returns its id.
    ///
    /// Any session id parameter left over from a previous selection is
    /// removed from the location.
    pub fn create_thread(&mut self) -> String {
        location::remove_session_id(self.location.as_ref());

        let thread = ChatThread::new();
        let thread_id = thread.id.clone();
        self.store.apply(ConversationEvent::AddThread { thread });

        tracing::debug!("[TurnOrchestrator] created thread {thread_id}");
        thread_id
    }

    /// Selects an existing thread and republishes its session id to the
    /// location (or removes the parameter for an unbound thread).
    pub fn select_thread(&mut self, thread_id: &str) {
        let Some(thread) = self.store.state().thread(thread_id) else {
            tracing::warn!("[TurnOrchestrator] select_thread: unknown thread {thread_id}");
            return;
        };
        let session_id = thread.session_id.clone();

        self.store.apply(ConversationEvent::SetCurrentThread {
            thread_id: Some(thread_id.to_string()),
        });

        match session_id {
            Some(session_id) => location::set_session_id(self.location.as_ref(), &session_id),
            None => location::remove_session_id(self.location.as_ref()),
        }
    }

    /// Drives one user turn to completion.
    ///
    /// With no current thread the turn is silently dropped; the embedding
    /// layer is expected to prevent that state. Transport and pipeline
    /// failures are resolved into the placeholder message and never
    /// propagate past this call. Exactly one assistant message exists per
    /// turn afterwards, and the loading flag is released on every path.
    pub async fn send_turn(&mut self, text: &str, finalize: bool) {
        let Some(thread) = self.store.state().current_thread() else {
            tracing::warn!("[TurnOrchestrator] send_turn without a current thread; dropping input");
            return;
        };
        let thread_id = thread.id.clone();
        let is_first = thread.messages.is_empty();
        let bound_session = thread.session_id.clone();
        let user_id = self.store.state().user_id.clone();

        self.store.apply(ConversationEvent::AppendMessage {
            thread_id: thread_id.clone(),
            message: Message::user(text),
        });

        if is_first {
            self.store.apply(ConversationEvent::UpdateThread {
                thread_id: thread_id.clone(),
                patch: ThreadPatch::title(derive_title(text)),
            });
        }

        let placeholder = Message::typing();
        let placeholder_id = placeholder.id.clone();
        self.store.apply(ConversationEvent::AppendMessage {
            thread_id: thread_id.clone(),
            message: placeholder,
        });

        self.store.apply(ConversationEvent::SetLoading { loading: true });

        // The first turn starts a fresh server-side session: no session id
        // is sent, even if the thread happens to carry a stale one.
        let mut request = AdGenerationRequest::new(text, user_id).finalized(finalize);
        if !is_first && let Some(session_id) = bound_session.clone() {
            request = request.with_session_id(session_id);
        }

        match self.pipeline.generate(request).await {
            Ok(response) if response.success => {
                self.resolve_success(&thread_id, &placeholder_id, bound_session.is_none(), &response);
            }
            Ok(response) => {
                let reason = response
                    .error
                    .as_deref()
                    .filter(|error| !error.is_empty())
                    .unwrap_or(UNKNOWN_ERROR);
                self.resolve_failure(&thread_id, &placeholder_id, format!("Error: {reason}"));
            }
            Err(error) => {
                tracing::error!("[TurnOrchestrator] transport failure: {error}");
                self.resolve_failure(&thread_id, &placeholder_id, TRANSPORT_APOLOGY.to_string());
            }
        }

        self.store.apply(ConversationEvent::SetLoading { loading: false });
    }

    fn resolve_success(
        &mut self,
        thread_id: &str,
        placeholder_id: &str,
        needs_binding: bool,
        response: &AdGenerationResponse,
    ) {
        if needs_binding && !response.session_id.is_empty() {
            self.store.apply(ConversationEvent::UpdateThread {
                thread_id: thread_id.to_string(),
                patch: ThreadPatch::session_id(&response.session_id),
            });
            location::set_session_id(self.location.as_ref(), &response.session_id);
        }

        let display_id = Uuid::new_v4().to_string();
        self.store.apply(ConversationEvent::UpdateMessage {
            thread_id: thread_id.to_string(),
            message_id: placeholder_id.to_string(),
            patch: MessagePatch {
                id: Some(display_id.clone()),
                content: Some(display_content(response)),
                agent_used: Some(AGENT_USED.to_string()),
                step_name: Some(STEP_NAME.to_string()),
                is_typing: Some(false),
            },
        });

        for artifact in extract_artifacts(response, &display_id) {
            self.store.apply(ConversationEvent::AddArtifact { artifact });
        }
    }

    fn resolve_failure(&mut self, thread_id: &str, placeholder_id: &str, content: String) {
        self.store.apply(ConversationEvent::UpdateMessage {
            thread_id: thread_id.to_string(),
            message_id: placeholder_id.to_string(),
            patch: MessagePatch {
                id: Some(Uuid::new_v4().to_string()),
                content: Some(content),
                is_typing: Some(false),
                ..MessagePatch::default()
            },
        });
        self.store.apply(ConversationEvent::UpdateThread {
            thread_id: thread_id.to_string(),
            patch: ThreadPatch::status(ThreadStatus::Error),
        });
    }
}

/// Computes the assistant's display content for a successful response:
/// generated copy, else the enhanced prompt, else a fixed fallback; a
/// successfully rendered image is appended as a markdown reference.
fn display_content(response: &AdGenerationResponse) -> String {
    let mut content = response
        .generated_post
        .as_deref()
        .filter(|post| !post.is_empty())
        .or_else(|| {
            response
                .enhanced_prompt
                .as_deref()
                .filter(|prompt| !prompt.is_empty())
        })
        .unwrap_or(FALLBACK_REPLY)
        .to_string();

    if let Some(image) = &response.generated_image
        && image.success
        && let Some(url) = image.location()
    {
        content.push_str(&format!("\n\n![Generated Image]({url})"));
    }

    content
}
