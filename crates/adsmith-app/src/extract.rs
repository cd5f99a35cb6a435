//! Artifact extraction from pipeline responses.

use adsmith_core::conversation::{Artifact, ArtifactKind};
use adsmith_core::pipeline::AdGenerationResponse;

const TITLE_PROMPT: &str = "Enhanced Prompt";
const TITLE_POST: &str = "Generated Ad Content";
const TITLE_COMPLIANCE: &str = "Compliance Check";
const TITLE_IMAGE_PROMPT: &str = "Image Prompt";
const TITLE_IMAGE_RESULT: &str = "Generated Image";

/// Extracts typed artifacts from a successfully resolved turn.
///
/// The order is fixed: enhanced prompt, generated post, compliance check,
/// image prompt, then the rendered image when one was generated. Fields
/// that are missing or empty produce nothing, so a turn yields zero to five
/// artifacts. Every artifact carries the response's session id and the
/// resolved assistant message's id.
pub fn extract_artifacts(response: &AdGenerationResponse, message_id: &str) -> Vec<Artifact> {
    let mut artifacts = Vec::new();

    if let Some(prompt) = non_empty(&response.enhanced_prompt) {
        artifacts.push(Artifact::new(
            ArtifactKind::Prompt,
            TITLE_PROMPT,
            prompt,
            &response.session_id,
            message_id,
        ));
    }

    if let Some(post) = non_empty(&response.generated_post) {
        artifacts.push(Artifact::new(
            ArtifactKind::Post,
            TITLE_POST,
            post,
            &response.session_id,
            message_id,
        ));
    }

    if let Some(compliance) = non_empty(&response.compliance_check) {
        artifacts.push(Artifact::new(
            ArtifactKind::Compliance,
            TITLE_COMPLIANCE,
            compliance,
            &response.session_id,
            message_id,
        ));
    }

    if let Some(image_prompt) = non_empty(&response.image_prompt) {
        artifacts.push(Artifact::new(
            ArtifactKind::Image,
            TITLE_IMAGE_PROMPT,
            image_prompt,
            &response.session_id,
            message_id,
        ));
    }

    if let Some(image) = &response.generated_image
        && image.success
        && let Some(url) = image.location()
    {
        let content = format!("![Generated Image]({url})\n\n**Image URL:** {url}");
        artifacts.push(Artifact::new(
            ArtifactKind::Image,
            TITLE_IMAGE_RESULT,
            content,
            &response.session_id,
            message_id,
        ));
    }

    artifacts
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
