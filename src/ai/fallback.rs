//! Ordered fallback over image-generation backends.
//!
//! Backends are tried strictly in list order; the first inline payload
//! wins and ends the iteration. There is no backoff and no second attempt
//! against the same backend. Every attempt leaves a human-readable line in
//! the caller's debug log, which is the only observability surface the
//! API returns.

use super::{BackendResponse, GeminiClient, GeminiImageModel, ImageBackend, ResponsePart};
use crate::models::GeneratedImage;
use crate::{Error, Result};
use base64::Engine as _;
use std::sync::Arc;
use tracing::warn;

pub struct FallbackRunner {
    backends: Vec<Box<dyn ImageBackend>>,
}

impl FallbackRunner {
    pub fn new(backends: Vec<Box<dyn ImageBackend>>) -> Self {
        Self { backends }
    }

    /// Build a runner over Gemini models sharing one client.
    pub fn gemini(client: Arc<GeminiClient>, models: &[String]) -> Self {
        Self::new(
            models
                .iter()
                .map(|model| {
                    Box::new(GeminiImageModel::new(client.clone(), model.clone()))
                        as Box<dyn ImageBackend>
                })
                .collect(),
        )
    }

    /// Try each backend in order until one yields an inline image payload.
    ///
    /// Appends one or more lines per attempt to `debug`. Fails with
    /// [`Error::GenerationExhausted`] carrying the per-backend failure
    /// reasons once the list runs out.
    pub async fn run(&self, prompt: &str, debug: &mut Vec<String>) -> Result<GeneratedImage> {
        let mut failures = Vec::new();

        for backend in &self.backends {
            let name = backend.name();
            debug.push(format!("Trying model: {}", name));

            let response = match backend.generate(prompt).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Image backend {} failed: {}", name, e);
                    debug.push(format!("{} error: {}", name, e));
                    failures.push(format!("{}: {}", name, e));
                    continue;
                }
            };

            debug.push(format!("Response received from {}", name));

            match Self::first_inline(&response, name, debug) {
                Some(Ok((bytes, mime_type))) => {
                    return Ok(GeneratedImage {
                        bytes,
                        mime_type,
                        model: name.to_string(),
                    });
                }
                Some(Err(reason)) => {
                    debug.push(reason.clone());
                    failures.push(format!("{}: {}", name, reason));
                }
                None => {
                    debug.push(format!("No image found in response from {}", name));
                    failures.push(format!("{}: no inline image data", name));
                }
            }
        }

        Err(Error::GenerationExhausted(failures))
    }

    /// Scan the response parts for the first inline payload and decode it.
    ///
    /// Returns `None` when no inline part exists, `Some(Err)` when one
    /// exists but its base64 payload is unusable.
    fn first_inline(
        response: &BackendResponse,
        name: &str,
        debug: &mut Vec<String>,
    ) -> Option<std::result::Result<(Vec<u8>, String), String>> {
        debug.push(format!("Found {} parts", response.parts.len()));

        let (mime_type, data) = response.parts.iter().find_map(|part| match part {
            ResponsePart::Inline { mime_type, data } => Some((mime_type, data)),
            ResponsePart::Text(_) => None,
        })?;

        debug.push(format!("Found inlineData with mimeType: {}", mime_type));

        Some(
            base64::engine::general_purpose::STANDARD
                .decode(data)
                .map(|bytes| (bytes, mime_type.clone()))
                .map_err(|e| {
                    warn!("Undecodable inline payload from {}: {}", name, e);
                    format!("invalid base64 image data: {}", e)
                }),
        )
    }
}
