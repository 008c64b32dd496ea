mod types;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::{Path, PathBuf};
use tokio::fs;

pub use types::*;

use crate::config::Config;
use crate::core::variation;
use crate::core::{Render, RenderImage, SceneError, SceneSelection};
use crate::http_client::HTTP_CLIENT;

/// The user's uploaded photo, loaded once and reused across the primary
/// render and every variation.
#[derive(Debug, Clone)]
pub struct SourcePhoto {
    pub path: PathBuf,
    pub base64: String,
    pub mime_type: String,
}

impl SourcePhoto {
    /// Load a photo from disk and encode it for inline transport.
    pub async fn load(path: &Path) -> Result<Self, SceneError> {
        let path = path
            .canonicalize()
            .map_err(|_| SceneError::ImageError(format!("Photo not found: {}", path.display())))?;
        let data = fs::read(&path).await?;

        let mime_type = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/png",
        };

        Ok(Self {
            base64: BASE64.encode(&data),
            mime_type: mime_type.to_string(),
            path,
        })
    }
}

/// Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client from config
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        let api_key = config
            .api_key()
            .ok_or(SceneError::MissingApiKey)?
            .to_string();

        Ok(Self {
            api_key,
            base_url: config.api.base_url.clone(),
            model: config.api.model.clone(),
        })
    }

    /// Produce the primary render for the current selection.
    pub async fn render_scene(
        &self,
        photo: &SourcePhoto,
        selection: &SceneSelection,
    ) -> Result<Render, SceneError> {
        let mut render = Render::new_primary(selection.clone());
        render.image = Some(self.request_render(photo, &render.instruction).await?);
        Ok(render)
    }

    /// Produce a randomized variation batch around the current selection.
    ///
    /// All renders are issued concurrently and joined all-or-nothing: if any
    /// one fails, the batch fails with a single aggregate error and the
    /// successful renders are discarded.
    pub async fn render_variations(
        &self,
        photo: &SourcePhoto,
        current: &SceneSelection,
        count: usize,
    ) -> Result<Vec<Render>, SceneError> {
        let plans = {
            let mut rng = rand::thread_rng();
            variation::plan_variations(current, count, &mut rng)
        };

        tracing::debug!("Planned {} variation(s)", plans.len());

        let batch: Vec<_> = plans
            .into_iter()
            .enumerate()
            .map(|(i, selection)| async move {
                let mut render = Render::new_variation(selection, i + 1);
                render.image = Some(self.request_render(photo, &render.instruction).await?);
                Ok::<_, SceneError>(render)
            })
            .collect();

        variation::join_batch(batch)
            .await
            .map_err(|e| SceneError::VariationFailed(e.to_string()))
    }

    /// One outbound call: photo + instruction in, image payload out.
    async fn request_render(
        &self,
        photo: &SourcePhoto,
        instruction: &str,
    ) -> Result<RenderImage, SceneError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = build_request(photo, instruction);

        tracing::debug!("Sending render request to model {}", self.model);
        tracing::debug!("Instruction: {}", instruction);

        let response = HTTP_CLIENT.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("Response status: {}", status);
        tracing::debug!("Response body: {}", body);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SceneError::ApiError {
                message,
                source: None,
            });
        }

        let response: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| SceneError::InvalidResponse(e.to_string()))?;

        extract_image(response)
    }
}

/// Build the API request body: the photo first, then the instruction.
fn build_request(photo: &SourcePhoto, instruction: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![
                RequestPart::InlineData {
                    inline_data: InlineData {
                        mime_type: photo.mime_type.clone(),
                        data: photo.base64.clone(),
                    },
                },
                RequestPart::Text {
                    text: instruction.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
        },
    }
}

/// Pull the image payload out of a response, surfacing refusals.
fn extract_image(response: GenerateResponse) -> Result<RenderImage, SceneError> {
    // Prompt-level blocks come back as HTTP 200
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            let message = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
            return Err(SceneError::GenerationFailed(message));
        }
    }

    for candidate in response.candidates {
        if let Some(reason) = &candidate.finish_reason {
            if reason != "STOP" && reason != "MAX_TOKENS" {
                let message = candidate
                    .finish_message
                    .as_deref()
                    .unwrap_or("Image generation was refused by the API");
                tracing::warn!("Generation refused: {} - {}", reason, message);
                return Err(SceneError::GenerationFailed(message.to_string()));
            }
        }

        if let Some(content) = candidate.content {
            for part in content.parts {
                if let Some(text) = &part.text {
                    tracing::debug!("Response text: {}", text);
                }
                if let Some(inline) = part.inline_data {
                    return Ok(RenderImage::new(inline.data, inline.mime_type));
                }
            }
        }
    }

    Err(SceneError::GenerationFailed("No image in response".to_string()))
}

/// Decode and write a render's image to disk, recording the path on the
/// render and dropping the in-memory payload.
pub async fn save_render(
    render: &mut Render,
    output_dir: &Path,
    keyword: Option<&str>,
) -> Result<PathBuf, SceneError> {
    let image = render
        .image
        .as_mut()
        .ok_or_else(|| SceneError::ImageError("Render has no image payload".to_string()))?;
    let data = image
        .data
        .take()
        .ok_or_else(|| SceneError::ImageError("Image payload already saved".to_string()))?;

    let bytes = BASE64
        .decode(&data)
        .map_err(|e| SceneError::ImageError(format!("Failed to decode base64 image: {}", e)))?;

    fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(render.file_name(keyword));
    fs::write(&path, &bytes).await?;

    tracing::info!("Saved render to: {}", path.display());

    if let Some(image) = render.image.as_mut() {
        image.path = Some(path.to_string_lossy().to_string());
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> SourcePhoto {
        SourcePhoto {
            path: PathBuf::from("beach.jpg"),
            base64: "aGVsbG8=".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn test_build_request_photo_precedes_instruction() {
        let request = build_request(&photo(), "night winter");
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[0], RequestPart::InlineData { .. }));
        match &parts[1] {
            RequestPart::Text { text } => assert_eq!(text, "night winter"),
            _ => panic!("expected text part"),
        }
    }

    #[test]
    fn test_build_request_asks_for_image_modality() {
        let request = build_request(&photo(), "x");
        assert!(request
            .generation_config
            .response_modalities
            .contains(&"IMAGE".to_string()));
    }

    #[test]
    fn test_extract_image_returns_payload() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "aWRr"}}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let image = extract_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data.as_deref(), Some("aWRr"));
    }

    #[test]
    fn test_extract_image_surfaces_refusal() {
        let json = r#"{
            "candidates": [{
                "finishReason": "IMAGE_SAFETY",
                "finishMessage": "The photo could not be restyled"
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let err = extract_image(response).unwrap_err();
        assert!(matches!(err, SceneError::GenerationFailed(_)));
        assert!(err.to_string().contains("could not be restyled"));
    }

    #[test]
    fn test_extract_image_surfaces_prompt_block() {
        let json = r#"{
            "promptFeedback": {"blockReason": "SAFETY"}
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let err = extract_image(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_image_fails_on_empty_response() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        let err = extract_image(response).unwrap_err();
        assert!(err.to_string().contains("No image in response"));
    }
}
