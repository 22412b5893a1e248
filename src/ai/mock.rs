use super::{BackendResponse, ConceptService, ImageBackend, ResponsePart};
use crate::models::Concept;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::sync::{Arc, Mutex};

/// Scripted concept generator for orchestrator and handler tests.
#[derive(Clone)]
pub struct MockConceptClient {
    concepts: Arc<Mutex<Vec<Concept>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockConceptClient {
    pub fn new() -> Self {
        Self {
            concepts: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_concepts(self, concepts: Vec<Concept>) -> Self {
        *self.concepts.lock().unwrap() = concepts;
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockConceptClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConceptService for MockConceptClient {
    async fn generate_concepts(&self, title: &str) -> Result<Vec<Concept>> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(Error::Backend(message.clone()));
        }

        let configured = self.concepts.lock().unwrap();
        if configured.is_empty() {
            // Default: the fixed-shape list of ten concepts the real
            // generator is prompted for.
            Ok((1..=10)
                .map(|id| Concept {
                    id,
                    name_ar: format!("مفهوم {}", id),
                    name_en: format!("Concept {}", id),
                    emotion: "fear".to_string(),
                    expression: "wide eyes".to_string(),
                    pose: "simple pose".to_string(),
                    scene: format!("scene for {}", title),
                    background: "plain gradient".to_string(),
                    arabic_text: "نص".to_string(),
                    text_position: "right".to_string(),
                    text_style: "bold".to_string(),
                    why_it_works: "it is emotional".to_string(),
                })
                .collect())
        } else {
            Ok(configured.clone())
        }
    }
}

/// Scripted image backend for fallback-runner tests.
#[derive(Clone)]
pub struct MockImageBackend {
    name: String,
    behavior: Behavior,
    call_count: Arc<Mutex<usize>>,
}

#[derive(Clone)]
enum Behavior {
    Fail(String),
    Respond(Vec<ResponsePart>),
    /// Fail the first N calls, then respond with the given parts.
    Flaky {
        remaining: Arc<Mutex<usize>>,
        parts: Vec<ResponsePart>,
    },
}

impl MockImageBackend {
    fn new(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always errors, as a dead or over-quota backend would.
    pub fn failing(name: &str, message: &str) -> Self {
        Self::new(name, Behavior::Fail(message.to_string()))
    }

    /// Returns one inline payload carrying `bytes` as a PNG.
    pub fn succeeding(name: &str, bytes: Vec<u8>) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::new(
            name,
            Behavior::Respond(vec![ResponsePart::Inline {
                mime_type: "image/png".to_string(),
                data,
            }]),
        )
    }

    /// Responds successfully but with zero parts.
    pub fn empty(name: &str) -> Self {
        Self::new(name, Behavior::Respond(Vec::new()))
    }

    /// Responds with a single text part and no image.
    pub fn text_only(name: &str, text: &str) -> Self {
        Self::new(
            name,
            Behavior::Respond(vec![ResponsePart::Text(text.to_string())]),
        )
    }

    /// Responds with an inline part whose payload is taken verbatim.
    pub fn with_raw_inline(name: &str, mime_type: &str, data: &str) -> Self {
        Self::new(
            name,
            Behavior::Respond(vec![ResponsePart::Inline {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }]),
        )
    }

    /// Responds with an arbitrary part list.
    pub fn with_parts(name: &str, parts: Vec<ResponsePart>) -> Self {
        Self::new(name, Behavior::Respond(parts))
    }

    /// Fails the first `failures` calls, then succeeds with `bytes`.
    pub fn flaky(name: &str, failures: usize, bytes: Vec<u8>) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::new(
            name,
            Behavior::Flaky {
                remaining: Arc::new(Mutex::new(failures)),
                parts: vec![ResponsePart::Inline {
                    mime_type: "image/png".to_string(),
                    data,
                }],
            },
        )
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> Result<BackendResponse> {
        *self.call_count.lock().unwrap() += 1;

        match &self.behavior {
            Behavior::Fail(message) => Err(Error::Backend(message.clone())),
            Behavior::Respond(parts) => Ok(BackendResponse {
                parts: parts.clone(),
            }),
            Behavior::Flaky { remaining, parts } => {
                let mut left = remaining.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    Err(Error::Backend("transient failure".to_string()))
                } else {
                    Ok(BackendResponse {
                        parts: parts.clone(),
                    })
                }
            }
        }
    }
}
