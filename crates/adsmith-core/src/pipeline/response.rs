//! Pipeline response bodies.

use serde::{Deserialize, Serialize};

/// Result of one turn submission.
///
/// The optional text fields are populated per pipeline step; which ones are
/// present depends on how far the server-side session has progressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdGenerationResponse {
    pub success: bool,
    /// Server-assigned session correlation token
    #[serde(default)]
    pub session_id: String,
    /// Echo of the submitted prompt
    #[serde(default)]
    pub initial_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_check: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<GeneratedImage>,
    /// Present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Image rendering result attached to a final turn.
///
/// The image location arrives under one of three keys depending on the
/// upstream renderer; [`GeneratedImage::location`] resolves them in priority
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<GeneratedImageDatum>>,
}

/// One entry of the renderer's result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImageDatum {
    #[serde(default)]
    pub url: Option<String>,
}

impl GeneratedImage {
    /// Resolves the image location.
    ///
    /// Candidates are tried in order: the direct `image_url` field, the
    /// generic `url` field, then the first entry of the `data` list. Empty
    /// strings count as absent.
    pub fn location(&self) -> Option<&str> {
        non_empty(self.image_url.as_deref())
            .or_else(|| non_empty(self.url.as_deref()))
            .or_else(|| non_empty(self.data.as_ref()?.first()?.url.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Accumulated server-side context for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default)]
    pub previous_steps: Vec<PipelineStep>,
}

/// One completed step of a server-side session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub step_name: String,
    pub agent_key: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_summary: Option<String>,
}

/// Envelope of the session context endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContextResponse {
    pub success: bool,
    #[serde(default)]
    pub session_context: SessionContext,
}

/// One entry of a user's session history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_post: Option<String>,
}

/// Envelope of the session history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
    #[serde(default)]
    pub count: usize,
}

/// Health check result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_url_wins_over_generic_url() {
        let image = GeneratedImage {
            success: true,
            image_url: Some("https://img.example/direct.png".to_string()),
            url: Some("https://img.example/generic.png".to_string()),
            data: Some(vec![GeneratedImageDatum {
                url: Some("https://img.example/list.png".to_string()),
            }]),
        };
        assert_eq!(image.location(), Some("https://img.example/direct.png"));
    }

    #[test]
    fn test_generic_url_wins_over_data_list() {
        let image = GeneratedImage {
            success: true,
            url: Some("https://img.example/generic.png".to_string()),
            data: Some(vec![GeneratedImageDatum {
                url: Some("https://img.example/list.png".to_string()),
            }]),
            ..GeneratedImage::default()
        };
        assert_eq!(image.location(), Some("https://img.example/generic.png"));
    }

    #[test]
    fn test_data_list_is_last_resort() {
        let image = GeneratedImage {
            success: true,
            data: Some(vec![GeneratedImageDatum {
                url: Some("https://img.example/list.png".to_string()),
            }]),
            ..GeneratedImage::default()
        };
        assert_eq!(image.location(), Some("https://img.example/list.png"));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let image = GeneratedImage {
            success: true,
            image_url: Some(String::new()),
            url: Some("https://img.example/generic.png".to_string()),
            ..GeneratedImage::default()
        };
        assert_eq!(image.location(), Some("https://img.example/generic.png"));
    }

    #[test]
    fn test_no_location() {
        let image = GeneratedImage {
            success: true,
            data: Some(Vec::new()),
            ..GeneratedImage::default()
        };
        assert_eq!(image.location(), None);
    }

    #[test]
    fn test_response_decodes_with_minimal_fields() {
        let response: AdGenerationResponse =
            serde_json::from_str(r#"{"success":true,"session_id":"s-1","initial_prompt":"hi"}"#)
                .unwrap();
        assert!(response.success);
        assert_eq!(response.session_id, "s-1");
        assert!(response.enhanced_prompt.is_none());
        assert!(response.generated_image.is_none());
    }

    #[test]
    fn test_response_decodes_full_payload() {
        let response: AdGenerationResponse = serde_json::from_str(
            r#"{
                "success": true,
                "session_id": "s-2",
                "initial_prompt": "shoes ad",
                "enhanced_prompt": "A bold campaign for running shoes",
                "generated_post": "Run farther.",
                "compliance_check": "No issues found.",
                "image_prompt": "runner at dawn",
                "generated_image": {"success": true, "image_url": "https://img.example/a.png"}
            }"#,
        )
        .unwrap();
        assert_eq!(response.generated_post.as_deref(), Some("Run farther."));
        let image = response.generated_image.unwrap();
        assert!(image.success);
        assert_eq!(image.location(), Some("https://img.example/a.png"));
    }

    #[test]
    fn test_history_response_decodes() {
        let response: SessionHistoryResponse = serde_json::from_str(
            r#"{
                "success": true,
                "sessions": [{"session_id": "s-1", "user_id": "u", "created_at": "", "updated_at": "", "status": "active"}],
                "count": 1
            }"#,
        )
        .unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.sessions[0].session_id, "s-1");
    }
}
