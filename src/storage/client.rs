use super::StorageService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for a Supabase-style storage REST API.
///
/// The service is addressed by a project base URL plus a bearer key;
/// objects live under a named bucket and are publicly readable at a
/// predictable path.
pub struct StorageClient {
    client: Client,
    base_url: String,
    key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(base_url: String, key: String, bucket: String) -> Self {
        Self::new_with_client(base_url, key, bucket, Client::new())
    }

    pub fn new_with_client(base_url: String, key: String, bucket: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
            bucket,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}

#[async_trait]
impl StorageService for StorageClient {
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<String> {
        let response = self
            .client
            .post(self.object_url(path))
            .timeout(Duration::from_secs(60))
            .bearer_auth(&self.key)
            .header("Content-Type", content_type)
            // Overwrite on conflict: re-running a concept replaces its file.
            .header("x-upsert", "true")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to upload file: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "Upload failed (status {}): {}",
                status, error_text
            )));
        }

        Ok(self.public_url(path))
    }
}
