//! Wire contract of the remote ad-generation pipeline.
//!
//! The pipeline is an opaque multi-step service: one turn submission runs
//! brainstorming, copy generation, compliance checking, and (on a final
//! turn) image rendering server-side, correlated by a server-assigned
//! session id.

mod request;
mod response;

pub use request::AdGenerationRequest;
pub use response::{
    AdGenerationResponse, GeneratedImage, GeneratedImageDatum, HealthResponse, PipelineStep,
    SessionContext, SessionContextResponse, SessionHistoryResponse, SessionSummary,
};

use async_trait::async_trait;

use crate::error::Result;

/// Client-side seam to the remote pipeline.
///
/// One call is a single attempt: there are no retries, no backoff, and no
/// cancellation. A failure is reported to the caller exactly once.
#[async_trait]
pub trait AdPipeline: Send + Sync {
    /// Submits one turn and returns the decoded response unchanged.
    async fn generate(&self, request: AdGenerationRequest) -> Result<AdGenerationResponse>;
}
