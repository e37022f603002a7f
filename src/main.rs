//! COBI gallery image downloader with Strapi sync
//!
//! Scrapes the curated product pages, downloads each main gallery image,
//! and (when a credential is configured) uploads it and links it to the
//! matching set record. Per-set failures are logged and skipped; the run
//! always completes the catalog.

use anyhow::Result;
use tracing::info;

use cobi_image_sync_lib::application::ImageSyncPipeline;
use cobi_image_sync_lib::domain::ProductCatalog;
use cobi_image_sync_lib::infrastructure::config::AppConfig;
use cobi_image_sync_lib::infrastructure::http_client::{PageClient, PageClientConfig};
use cobi_image_sync_lib::infrastructure::{GalleryImageExtractor, ImageStore, StrapiClient, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging()?;

    info!("🧱 COBI Image Downloader");

    let config = AppConfig::from_env();

    let client = PageClient::with_config(PageClientConfig::from_download_config(&config.download))?;
    let extractor = GalleryImageExtractor::new();
    let store = ImageStore::new(config.download.images_dir.clone());
    let backend = StrapiClient::from_config(&config.backend)?;

    let pipeline = ImageSyncPipeline::new(client, extractor, store, backend);
    let summary = pipeline.run(&ProductCatalog::builtin()).await?;

    info!("✅ Done! {}", summary);
    info!("Images saved to: {}", config.download.images_dir.display());

    Ok(())
}
