//! adsmith-app - turn orchestration over the conversation store.
//!
//! Sits between user input and the transport: each user turn becomes a
//! sequence of store events (optimistic user message, pending placeholder,
//! loading flag, resolution) around a single pipeline call.

mod extract;
mod orchestrator;

pub use extract::extract_artifacts;
pub use orchestrator::TurnOrchestrator;
