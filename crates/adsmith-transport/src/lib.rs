//! adsmith-transport - HTTP adapter for the remote ad-generation pipeline.
//!
//! The only crate that performs network I/O. It maps outgoing turns to the
//! pipeline's request shape and decodes responses back, one attempt per
//! call, surfacing every failure to the caller exactly once.

mod client;
mod config;

pub use client::HttpPipelineClient;
pub use config::{DEFAULT_BASE_URL, PipelineConfig};
