//! HTTP surface: two JSON endpoints over the generation pipeline.
//!
//! Handlers are stateless; credentials resolve request-value-first, then
//! server configuration. Services are built per request.

pub mod handlers;
pub mod types;

use crate::models::Config;
use axum::routing::post;
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ideas", post(handlers::generate_ideas))
        .route("/thumbnail", post(handlers::generate_thumbnail))
        .with_state(state)
}
