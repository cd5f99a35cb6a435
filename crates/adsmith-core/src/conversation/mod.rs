//! Conversation domain module.
//!
//! This module contains the chat thread, message, and artifact domain models
//! plus the event-sourced store that keeps them consistent.
//!
//! # Module Structure
//!
//! - `thread`: Chat thread domain model (`ChatThread`, `ThreadStatus`)
//! - `message`: Conversation message types (`Message`, `MessageSender`)
//! - `artifact`: Typed pipeline byproducts (`Artifact`, `ArtifactKind`)
//! - `state`: Root conversation state (`ConversationState`)
//! - `event`: Closed set of store mutations (`ConversationEvent`)
//! - `store`: Event application (`ConversationStore`, `reduce`)

mod artifact;
mod event;
mod message;
mod state;
mod store;
mod thread;

// Re-export public API
pub use artifact::{Artifact, ArtifactKind};
pub use event::{ConversationEvent, MessagePatch, ThreadPatch};
pub use message::{Message, MessageSender};
pub use state::{ConversationState, DEFAULT_USER_ID};
pub use store::{ConversationStore, reduce};
pub use thread::{ChatThread, DEFAULT_THREAD_TITLE, ThreadStatus, derive_title};
