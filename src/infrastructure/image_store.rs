//! Local image storage with idempotent downloads
//!
//! One file per set number under a flat directory. A download is skipped
//! entirely (no network call) when the target file already exists.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::infrastructure::http_client::PageClient;

/// Extensions probed when looking for a previously saved image, in
/// precedence order
const KNOWN_EXTENSIONS: [&str; 3] = ["jpg", "png", "webp"];

/// Outcome of a download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    /// Fetched and written in this run
    Downloaded(PathBuf),
    /// Already present; no network call was made
    AlreadyExists(PathBuf),
}

impl StoredImage {
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded(path) | Self::AlreadyExists(path) => path,
        }
    }
}

/// Flat directory of images keyed by set number
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the images directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create images directory {}", self.dir.display()))
    }

    /// Target path for a file name inside the store.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Find an already saved image for a set, probing jpg, png, and webp
    /// in that order.
    pub async fn find_existing(&self, set_number: &str) -> Option<PathBuf> {
        for extension in KNOWN_EXTENSIONS {
            let candidate = self.dir.join(format!("{set_number}.{extension}"));
            if fs::try_exists(&candidate).await.unwrap_or(false) {
                return Some(candidate);
            }
        }
        None
    }

    /// Download `url` into `file_name` unless the file already exists.
    ///
    /// The response body is written verbatim.
    pub async fn download(&self, client: &PageClient, url: &str, file_name: &str) -> Result<StoredImage> {
        let path = self.path_for(file_name);

        if fs::try_exists(&path).await.unwrap_or(false) {
            info!("   Image already exists: {}", file_name);
            return Ok(StoredImage::AlreadyExists(path));
        }

        let body = client.fetch_bytes(url).await?;
        fs::write(&path, &body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("   Downloaded: {}", file_name);
        Ok(StoredImage::Downloaded(path))
    }
}
