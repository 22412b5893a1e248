//! Thumbnail generation pipeline: prompt, fallback generation, publish.

use crate::ai::FallbackRunner;
use crate::models::{Concept, Thumbnail};
use crate::prompts;
use crate::storage::StorageService;
use crate::Result;
use chrono::Utc;
use tracing::{info, warn};

/// Renders a concept into an image and optionally publishes it.
///
/// Storage is optional and failure there is deliberately non-fatal: a
/// thumbnail the user can still download inline beats a hard error.
pub struct ThumbnailGenerator {
    runner: FallbackRunner,
    storage: Option<Box<dyn StorageService>>,
}

impl ThumbnailGenerator {
    pub fn new(runner: FallbackRunner, storage: Option<Box<dyn StorageService>>) -> Self {
        Self { runner, storage }
    }

    /// Generate one thumbnail for `concept`, appending progress to `debug`.
    ///
    /// Stored objects are keyed by project, concept id, and a millisecond
    /// timestamp: `{project_id}/{concept_id}_{timestamp}.jpg`.
    pub async fn generate(
        &self,
        concept: &Concept,
        project_id: &str,
        debug: &mut Vec<String>,
    ) -> Result<Thumbnail> {
        let prompt = prompts::thumbnail_prompt(concept);
        let image = self.runner.run(&prompt, debug).await?;

        info!(
            "Generated thumbnail for concept {} with {} ({} bytes)",
            concept.id,
            image.model,
            image.bytes.len()
        );

        let mut image_url = None;
        if let Some(storage) = &self.storage {
            let key = format!(
                "{}/{}_{}.jpg",
                project_id,
                concept.id,
                Utc::now().timestamp_millis()
            );

            match storage.upload(&key, &image.bytes, "image/jpeg").await {
                Ok(url) => {
                    debug.push(format!("Uploaded to storage: {}", url));
                    image_url = Some(url);
                }
                Err(e) => {
                    warn!("Storage upload failed for concept {}: {}", concept.id, e);
                    debug.push(format!("Storage upload error: {}", e));
                }
            }
        }

        Ok(Thumbnail {
            concept: concept.clone(),
            bytes: image.bytes,
            mime_type: image.mime_type,
            model: image.model,
            image_url,
        })
    }
}
