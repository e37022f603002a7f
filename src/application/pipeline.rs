//! Sequential image sync pipeline
//!
//! Processes one catalog entry at a time: discover the gallery image,
//! download it, then run the optional Strapi phase. Every step returns a
//! `Result` the loop inspects; failures are logged and the run continues
//! with the next entry. No rollback, no batching, no parallelism.

use anyhow::Result;
use chrono::{DateTime, Utc};
use scraper::Html;
use std::fmt;
use tracing::{info, warn};

use crate::domain::catalog::{ProductCatalog, ProductSource};
use crate::infrastructure::gallery::GalleryImageExtractor;
use crate::infrastructure::http_client::PageClient;
use crate::infrastructure::image_store::{ImageStore, StoredImage};
use crate::infrastructure::strapi::StrapiClient;

/// Counters and timestamps for a completed run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub processed: u32,
    pub images_found: u32,
    pub downloaded: u32,
    pub already_present: u32,
    pub uploaded: u32,
    pub linked: u32,
    pub sets_missing: u32,
    pub failures: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sets processed, {} images found, {} downloaded, {} already present, {} uploaded, {} linked, {} sets missing, {} failures",
            self.processed,
            self.images_found,
            self.downloaded,
            self.already_present,
            self.uploaded,
            self.linked,
            self.sets_missing,
            self.failures
        )
    }
}

/// The full scrape -> download -> upload -> link pipeline
pub struct ImageSyncPipeline {
    client: PageClient,
    extractor: GalleryImageExtractor,
    store: ImageStore,
    backend: Option<StrapiClient>,
}

impl ImageSyncPipeline {
    pub fn new(
        client: PageClient,
        extractor: GalleryImageExtractor,
        store: ImageStore,
        backend: Option<StrapiClient>,
    ) -> Self {
        Self {
            client,
            extractor,
            store,
            backend,
        }
    }

    /// Whether the upload/link phase will run.
    pub fn upload_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Run the pipeline over a catalog in insertion order.
    ///
    /// Always completes the loop; the only hard failure is being unable to
    /// create the images directory.
    pub async fn run(&self, catalog: &ProductCatalog) -> Result<RunSummary> {
        let mut summary = RunSummary {
            started_at: Some(Utc::now()),
            ..RunSummary::default()
        };

        if self.backend.is_none() {
            warn!("⚠️  STRAPI_TOKEN not set - images will be downloaded but not uploaded");
        }

        self.store.ensure_dir().await?;

        for source in catalog.iter() {
            summary.processed += 1;
            info!("📦 Processing set {}...", source.set_number);
            self.process_entry(source, &mut summary).await;
        }

        summary.finished_at = Some(Utc::now());
        Ok(summary)
    }

    async fn process_entry(&self, source: &ProductSource, summary: &mut RunSummary) {
        let Some(image_url) = self.discover_main_image(source).await else {
            warn!("⚠️  No images found for set {}", source.set_number);
            summary.failures += 1;
            return;
        };
        summary.images_found += 1;

        let file_name = format!("{}.jpg", source.set_number);
        let stored = match self.store.download(&self.client, &image_url, &file_name).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("⚠️  Failed to download image for set {}: {}", source.set_number, e);
                summary.failures += 1;
                return;
            }
        };
        match &stored {
            StoredImage::Downloaded(_) => summary.downloaded += 1,
            StoredImage::AlreadyExists(_) => summary.already_present += 1,
        }

        let Some(backend) = &self.backend else {
            return;
        };

        let asset = match backend.upload_image(stored.path()).await {
            Ok(asset) => {
                info!("   Uploaded to Strapi: {}", asset.name);
                asset
            }
            Err(e) => {
                warn!("⚠️  Upload failed for set {}: {}", source.set_number, e);
                summary.failures += 1;
                return;
            }
        };
        summary.uploaded += 1;

        let record = match backend.find_set(&source.set_number).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!("⚠️  Set {} not found in Strapi", source.set_number);
                summary.sets_missing += 1;
                return;
            }
            Err(e) => {
                warn!("⚠️  Set lookup failed for {}: {}", source.set_number, e);
                summary.failures += 1;
                return;
            }
        };

        match backend.link_set_image(&record.document_id, asset.id).await {
            Ok(()) => {
                info!("   Updated set with image");
                summary.linked += 1;
            }
            Err(e) => {
                warn!("⚠️  Failed to update set {}: {}", source.set_number, e);
                summary.failures += 1;
            }
        }
    }

    /// Fetch the product page and extract its main gallery image.
    async fn discover_main_image(&self, source: &ProductSource) -> Option<String> {
        info!("   Fetching: {}", source.product_url);

        let body = match self.client.fetch_html(&source.product_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("⚠️  Error fetching page: {}", e);
                return None;
            }
        };

        // The parsed document is not Send, so parsing stays on this side of
        // any await point
        let html = Html::parse_document(&body);
        match self.extractor.main_image(&html, &source.product_url) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!("⚠️  Gallery extraction failed for {}: {}", source.product_url, e);
                None
            }
        }
    }
}
