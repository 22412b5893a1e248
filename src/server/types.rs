//! Wire types for the two JSON endpoints.

use crate::models::Concept;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeasRequest {
    pub title: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub success: bool,
    pub concepts: Vec<Concept>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    pub concept: Option<Concept>,
    pub api_key: Option<String>,
    pub storage_url: Option<String>,
    pub storage_key: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub success: bool,
    /// Inline image as a `data:` URL; always present on success.
    pub image_data: String,
    /// Public URL, present only when storage was configured and the
    /// upload succeeded.
    pub image_url: Option<String>,
    pub model: String,
    pub concept: Concept,
    pub debug: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ThumbnailErrorResponse {
    pub error: String,
    pub debug: Vec<String>,
}
