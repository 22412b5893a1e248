use super::client::GeminiClient;
use super::types::{Content, GenerateContentResponse};
use crate::ai::{BackendResponse, ImageBackend};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
}

/// One entry in the image fallback list: a model name bound to the shared
/// Gemini client. All listed models are called through `generateContent`;
/// the ones that can't serve it fail fast and the runner moves on.
pub struct GeminiImageModel {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiImageModel {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ImageBackend for GeminiImageModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<BackendResponse> {
        let request = ImageRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let response: GenerateContentResponse =
            self.client.generate_content(&self.model, &request).await?;

        Ok(response.into_backend_response())
    }
}
