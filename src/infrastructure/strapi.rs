//! Strapi backend client: media upload and set association
//!
//! Talks to the Strapi REST API with a bearer credential. Request and
//! response bodies are typed to just the fields this tool consumes.

use anyhow::{Context, Result, anyhow};
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::constants::backend;
use crate::infrastructure::config::BackendConfig;

/// Uploaded media entry, element `[0]` of the upload response collection
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    pub id: i64,
    pub name: String,
}

/// One `set` record from the content API
#[derive(Debug, Clone, Deserialize)]
pub struct SetRecord {
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SetQueryResponse {
    #[serde(default)]
    data: Vec<SetRecord>,
}

#[derive(Debug, Serialize)]
struct LinkImageRequest {
    data: LinkImageData,
}

#[derive(Debug, Serialize)]
struct LinkImageData {
    images: Vec<i64>,
}

/// Client for the Strapi content and upload APIs
pub struct StrapiClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    request_timeout: Duration,
    upload_timeout: Duration,
}

impl StrapiClient {
    /// Create a client for a base URL and bearer credential.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            request_timeout: Duration::from_secs(backend::REQUEST_TIMEOUT_SECONDS),
            upload_timeout: Duration::from_secs(backend::UPLOAD_TIMEOUT_SECONDS),
        })
    }

    /// Build a client from the backend settings; `None` when no credential
    /// is configured (download-only mode).
    pub fn from_config(config: &BackendConfig) -> Result<Option<Self>> {
        let Some(token) = &config.api_token else {
            return Ok(None);
        };

        let mut client = Self::new(&config.base_url, token)?;
        client.request_timeout = Duration::from_secs(config.request_timeout_seconds);
        client.upload_timeout = Duration::from_secs(config.upload_timeout_seconds);
        Ok(Some(client))
    }

    /// Upload a local image file; returns the first entry of the upload
    /// response collection.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadedAsset> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Invalid image path: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_for(&file_name))?;
        let form = multipart::Form::new().part("files", part);

        info!("   ⏳ Uploading {}...", file_name);
        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .bearer_auth(&self.api_token)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| anyhow!("Upload request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Upload failed with status {}", response.status()));
        }

        let mut assets: Vec<UploadedAsset> = response
            .json()
            .await
            .map_err(|e| anyhow!("Invalid upload response: {}", e))?;

        if assets.is_empty() {
            return Err(anyhow!("Upload response contained no entries"));
        }
        Ok(assets.remove(0))
    }

    /// Look up a set record by its set number.
    pub async fn find_set(&self, set_number: &str) -> Result<Option<SetRecord>> {
        let response = self
            .client
            .get(format!("{}/api/sets", self.base_url))
            .query(&[("filters[setNumber][$eq]", set_number)])
            .bearer_auth(&self.api_token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| anyhow!("Set lookup request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Set lookup failed with status {}", response.status()));
        }

        let body: SetQueryResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Invalid set lookup response: {}", e))?;

        Ok(body.data.into_iter().next())
    }

    /// Point a set's image association at an uploaded asset.
    pub async fn link_set_image(&self, document_id: &str, image_id: i64) -> Result<()> {
        let payload = LinkImageRequest {
            data: LinkImageData {
                images: vec![image_id],
            },
        };

        let response = self
            .client
            .put(format!("{}/api/sets/{}", self.base_url, document_id))
            .bearer_auth(&self.api_token)
            .json(&payload)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| anyhow!("Set update request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Set update failed with status {}", response.status()));
        }

        Ok(())
    }
}

/// MIME type by file extension; the backend rejects files without one
fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or("");
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
