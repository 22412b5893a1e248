//! Data models and structures
//!
//! Defines the core data structures for thumbnail concepts, generation
//! results, and service configuration.

use serde::{Deserialize, Serialize};

/// A structured thumbnail idea produced by the concept generator.
///
/// Produced once per title, immutable afterwards. `id` is what ties a
/// generated image back to the concept that seeded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub id: u32,
    pub name_ar: String,
    pub name_en: String,
    pub emotion: String,
    pub expression: String,
    pub pose: String,
    pub scene: String,
    pub background: String,
    pub arabic_text: String,
    pub text_position: String,
    pub text_style: String,
    pub why_it_works: String,
}

/// Raw image bytes produced by one of the fallback image models.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub model: String,
}

/// A finished thumbnail: the image plus the concept it came from and,
/// when storage is configured and the upload succeeded, a public URL.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub concept: Concept,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub model: String,
    pub image_url: Option<String>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub idea_model: String,
    pub image_models: Vec<String>,
    pub storage_url: Option<String>,
    pub storage_key: Option<String>,
    pub storage_bucket: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").ok(),
            idea_model: std::env::var("IDEA_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            image_models: std::env::var("IMAGE_MODELS")
                .map(|raw| {
                    raw.split(',')
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| Self::default_image_models()),
            storage_url: std::env::var("STORAGE_URL").ok(),
            storage_key: std::env::var("STORAGE_KEY").ok(),
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "thumbnails".to_string()),
        })
    }

    /// The ordered model list tried by the image fallback runner.
    pub fn default_image_models() -> Vec<String> {
        vec![
            "gemini-2.0-flash-preview-image-generation".to_string(),
            "imagen-3.0-generate-002".to_string(),
        ]
    }
}

/// Shared test fixture used across module tests.
#[cfg(test)]
pub(crate) fn sample_concept(id: u32) -> Concept {
    Concept {
        id,
        name_ar: "الخوف من الفشل".to_string(),
        name_en: "Fear of Failure".to_string(),
        emotion: "fear".to_string(),
        expression: "wide eyes, hand on forehead".to_string(),
        pose: "leaning forward at a desk".to_string(),
        scene: "home office desk".to_string(),
        background: "plain dark gradient".to_string(),
        arabic_text: "ليش تفشل؟".to_string(),
        text_position: "right side".to_string(),
        text_style: "bold white with red outline".to_string(),
        why_it_works: "names the viewer's fear directly".to_string(),
    }
}
