//! Thumbnail studio for Arabic YouTube channels
//!
//! Generates emotional thumbnail concepts from a video title, renders them
//! into images via a fallback list of Gemini image models, and optionally
//! publishes the results to an object-storage bucket.

pub mod ai;
pub mod app;
pub mod error;
pub mod extract;
pub mod models;
pub mod prompts;
pub mod server;
pub mod storage;
pub mod thumbnail;

pub use error::{Error, Result};
