//! Pipeline endpoint configuration.

use std::env;
use std::time::Duration;

/// Hosted pipeline endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://accenture-mne.ca.lyzr.app";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Endpoint configuration for [`crate::HttpPipelineClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Base URL of the pipeline service
    pub base_url: String,
    /// Timeout applied to each request
    pub request_timeout: Duration,
}

impl PipelineConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `AD_PIPELINE_URL` overrides the base URL; the hosted default is used
    /// otherwise.
    pub fn from_env() -> Self {
        let base_url =
            env::var("AD_PIPELINE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
