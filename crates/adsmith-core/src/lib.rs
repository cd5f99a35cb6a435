//! adsmith-core - domain models and client-side state machine for the
//! ad-generation chat client.
//!
//! This crate holds everything the surrounding layers share:
//!
//! - `conversation`: threads, messages, artifacts, and the event-sourced
//!   conversation store that keeps them consistent
//! - `pipeline`: the wire contract of the remote ad-generation pipeline and
//!   the `AdPipeline` seam the transport layer implements
//! - `location`: the session URL codec used to make a conversation
//!   shareable through a single `session_id` query parameter
//! - `error`: the shared error type
//!
//! There is no persistence: all state lives in memory for the lifetime of
//! the process, and the only externally visible piece of it is the session
//! id published to the addressable location.

pub mod conversation;
pub mod error;
pub mod location;
pub mod pipeline;

// Re-export common error type
pub use error::AdsmithError;
