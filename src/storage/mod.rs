//! Object-storage integration for publishing generated thumbnails
//!
//! Uploads image bytes to a hosted storage bucket and resolves public
//! URLs. Upload failure is always non-fatal to the generation flow.

pub mod client;
pub mod mock;

pub use client::StorageClient;
pub use mock::MockStorageClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store `data` under `path` and return the public URL it resolves to.
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<String>;
}
