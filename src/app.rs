//! Session orchestration: title in, selected thumbnails out.
//!
//! Drives the two-step workflow a user walks through: generate ten
//! concepts for a title, pick some, then render them one at a time. The
//! sequential loop with a fixed pause between requests is a deliberate
//! throttle for the upstream API, not a performance choice.

use crate::ai::ConceptService;
use crate::models::{Concept, Thumbnail};
use crate::thumbnail::ThumbnailGenerator;
use crate::{Error, Result};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_PAUSE: Duration = Duration::from_secs(2);

/// Where the session currently is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    GeneratingIdeas,
    AwaitingSelection,
    GeneratingThumbnails,
}

/// Display status surfaced alongside the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

/// One user session: concepts, selection, results, and the rolling debug
/// log. All backend calls run strictly sequentially.
pub struct Studio {
    concept_service: Box<dyn ConceptService>,
    generator: ThumbnailGenerator,
    pause: Duration,
    project_id: String,
    phase: Phase,
    status: Status,
    concepts: Vec<Concept>,
    selected: HashSet<u32>,
    results: Vec<Thumbnail>,
    debug: Vec<String>,
}

impl Studio {
    pub fn new(concept_service: Box<dyn ConceptService>, generator: ThumbnailGenerator) -> Self {
        Self {
            concept_service,
            generator,
            pause: DEFAULT_PAUSE,
            project_id: Uuid::new_v4().to_string(),
            phase: Phase::Idle,
            status: Status::Idle,
            concepts: Vec::new(),
            selected: HashSet::new(),
            results: Vec::new(),
            debug: Vec::new(),
        }
    }

    /// Override the inter-request pause (tests use zero).
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn selected(&self) -> &HashSet<u32> {
        &self.selected
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.results
    }

    pub fn debug_log(&self) -> &[String] {
        &self.debug
    }

    /// Generate concepts for a title. Empty titles are rejected before any
    /// network call; generator failure drops the session back to idle.
    pub async fn submit_title(&mut self, title: &str) -> Result<usize> {
        if title.trim().is_empty() {
            self.status = Status::Error("title is required".to_string());
            return Err(Error::MissingInput("title".to_string()));
        }

        self.phase = Phase::GeneratingIdeas;
        self.status = Status::Loading("Generating 10 concepts...".to_string());
        self.concepts.clear();
        self.selected.clear();
        self.results.clear();

        match self.concept_service.generate_concepts(title).await {
            Ok(concepts) => {
                info!("Generated {} concepts for title: {}", concepts.len(), title);
                self.status = Status::Success(format!("Generated {} concepts", concepts.len()));
                self.concepts = concepts;
                self.phase = Phase::AwaitingSelection;
                Ok(self.concepts.len())
            }
            Err(e) => {
                warn!("Concept generation failed: {}", e);
                self.status = Status::Error(e.to_string());
                self.phase = Phase::Idle;
                Err(e)
            }
        }
    }

    /// Pure set-membership toggle; never touches the network.
    pub fn toggle_concept(&mut self, id: u32) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Render every selected concept, one at a time, pausing between
    /// requests. Individual failures are logged and skipped; the batch
    /// always runs to the end. Returns (succeeded, attempted).
    pub async fn generate_selected(&mut self) -> Result<(usize, usize)> {
        if self.selected.is_empty() {
            self.status = Status::Error("selection is required".to_string());
            return Err(Error::MissingInput("selection".to_string()));
        }

        self.phase = Phase::GeneratingThumbnails;
        self.results.clear();

        let targets: Vec<Concept> = self
            .concepts
            .iter()
            .filter(|c| self.selected.contains(&c.id))
            .cloned()
            .collect();
        let total = targets.len();

        for (i, concept) in targets.iter().enumerate() {
            self.status = Status::Loading(format!(
                "Generating {}/{}: {}",
                i + 1,
                total,
                concept.name_ar
            ));
            self.debug.push(format!("--- {} ---", concept.name_en));

            match self
                .generator
                .generate(concept, &self.project_id, &mut self.debug)
                .await
            {
                Ok(thumbnail) => self.results.push(thumbnail),
                Err(e) => {
                    warn!("Thumbnail generation failed for concept {}: {}", concept.id, e);
                    self.debug.push(format!("ERROR: {}", e));
                }
            }

            // Fixed throttle between upstream calls, skipped after the last.
            if i + 1 < total {
                tokio::time::sleep(self.pause).await;
            }
        }

        let succeeded = self.results.len();
        self.status = if succeeded > 0 {
            Status::Success(format!("Generated {} of {} thumbnails", succeeded, total))
        } else {
            Status::Error("Failed to generate thumbnails".to_string())
        };
        self.phase = Phase::Idle;

        Ok((succeeded, total))
    }
}
