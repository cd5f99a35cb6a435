//! HTTP implementation of the pipeline client.
//!
//! Modeled as a thin adapter over `reqwest`: build the request, send it
//! once, check the status, decode the JSON body. Connection failures,
//! non-success statuses, and decode failures all map into `AdsmithError`
//! and propagate to the caller unchanged.

use adsmith_core::error::{AdsmithError, Result};
use adsmith_core::pipeline::{
    AdGenerationRequest, AdGenerationResponse, AdPipeline, HealthResponse, SessionContextResponse,
    SessionHistoryResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::PipelineConfig;

/// Pipeline client that talks to the ad-generation service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPipelineClient {
    client: Client,
    config: PipelineConfig,
}

impl HttpPipelineClient {
    /// Creates a client with the provided configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a client configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(PipelineConfig::from_env())
    }

    /// Fetches the accumulated server-side context for a session.
    pub async fn session_context(&self, session_id: &str) -> Result<SessionContextResponse> {
        let response = self
            .client
            .get(self.endpoint(&format!("/ad-generator/session/{session_id}")))
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetches a user's session history.
    pub async fn user_sessions(&self, user_id: &str, limit: usize) -> Result<SessionHistoryResponse> {
        let response = self
            .client
            .get(self.endpoint(&format!("/ad-generator/sessions/{user_id}")))
            .query(&[("limit", limit.to_string())])
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Checks service health.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(self.endpoint("/ad-generator/health"))
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        Self::decode(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdsmithError::api(status.as_u16(), message));
        }

        response.json::<T>().await.map_err(|e| AdsmithError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AdPipeline for HttpPipelineClient {
    /// Submits one turn to the generate endpoint, which runs the full
    /// pipeline with session context.
    async fn generate(&self, request: AdGenerationRequest) -> Result<AdGenerationResponse> {
        tracing::debug!(
            "submitting turn to pipeline (session: {:?}, final: {:?})",
            request.session_id,
            request.finalize
        );

        let response = self
            .client
            .post(self.endpoint("/ad-generator/generate"))
            .json(&request)
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        Self::decode(response).await
    }
}
