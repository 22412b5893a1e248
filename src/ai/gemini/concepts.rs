use super::client::GeminiClient;
use super::types::{Content, GenerateContentResponse};
use crate::ai::ConceptService;
use crate::models::Concept;
use crate::{extract, prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ConceptRequest {
    contents: Vec<Content>,
}

/// Single-shot concept generator: one prompt, one model, no fallback.
pub struct GeminiConceptClient {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiConceptClient {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ConceptService for GeminiConceptClient {
    async fn generate_concepts(&self, title: &str) -> Result<Vec<Concept>> {
        let request = ConceptRequest {
            contents: vec![Content::user_text(prompts::concepts_prompt(title))],
        };

        let response: GenerateContentResponse =
            self.client.generate_content(&self.model, &request).await?;

        let text = response
            .first_text()
            .ok_or_else(|| Error::Backend("No text in Gemini concept response".to_string()))?;

        extract::extract_array(text)
    }
}
