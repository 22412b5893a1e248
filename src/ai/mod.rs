//! AI service integration for concept and image generation
//!
//! Provides the trait seams between the application and the Gemini API:
//! one service producing structured thumbnail concepts from a title, and
//! one backend-per-model interface the fallback runner iterates over.

pub mod fallback;
pub mod gemini;
pub mod mock;

pub use fallback::FallbackRunner;
pub use gemini::{GeminiClient, GeminiConceptClient, GeminiImageModel};
pub use mock::{MockConceptClient, MockImageBackend};

use crate::models::Concept;
use crate::Result;
use async_trait::async_trait;

/// Generates the fixed-shape list of thumbnail concepts for a video title.
#[async_trait]
pub trait ConceptService: Send + Sync {
    async fn generate_concepts(&self, title: &str) -> Result<Vec<Concept>>;
}

/// One structured part of a generation response.
#[derive(Debug, Clone)]
pub enum ResponsePart {
    Text(String),
    /// Base64-encoded binary payload with its mime type.
    Inline { mime_type: String, data: String },
}

/// The structured response a backend hands to the fallback runner.
#[derive(Debug, Clone, Default)]
pub struct BackendResponse {
    pub parts: Vec<ResponsePart>,
}

/// A single image-generation backend, identified by model name.
///
/// Implementations report transport/API failures as errors; a response
/// without an inline payload is returned as-is and left for the fallback
/// runner to judge.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<BackendResponse>;
}
