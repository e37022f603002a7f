//! Upload locally saved set images to Strapi and link them
//!
//! Companion to the scraper for images saved by hand: probes the images
//! directory for `<set>.jpg` / `.png` / `.webp` per catalog entry, uploads
//! each hit, and points the matching set record at the uploaded asset.
//! Unlike the scraper, the credential is required.

use anyhow::{Result, bail};
use tracing::{info, warn};

use cobi_image_sync_lib::domain::ProductCatalog;
use cobi_image_sync_lib::infrastructure::config::AppConfig;
use cobi_image_sync_lib::infrastructure::{ImageStore, StrapiClient, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging()?;

    let config = AppConfig::from_env();
    let Some(backend) = StrapiClient::from_config(&config.backend)? else {
        bail!("STRAPI_TOKEN required");
    };
    let store = ImageStore::new(config.download.images_dir.clone());

    info!("🖼️  Uploading images to Strapi...");

    for source in ProductCatalog::builtin().iter() {
        let set_number = &source.set_number;
        info!("📦 Processing set {}...", set_number);

        let Some(path) = store.find_existing(set_number).await else {
            warn!("⚠️  No image found for set {}", set_number);
            continue;
        };
        info!(
            "   Found: {}",
            path.file_name().and_then(|name| name.to_str()).unwrap_or_default()
        );

        let record = match backend.find_set(set_number).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!("⚠️  Set {} not found in Strapi", set_number);
                continue;
            }
            Err(e) => {
                warn!("⚠️  Set lookup failed for {}: {}", set_number, e);
                continue;
            }
        };
        if let Some(name) = &record.name {
            info!("   Set: {}", name);
        }

        let uploaded = match backend.upload_image(&path).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!("❌ Error: {}", e);
                continue;
            }
        };
        info!("   ✓ Uploaded: {}", uploaded.name);

        match backend.link_set_image(&record.document_id, uploaded.id).await {
            Ok(()) => info!("   ✓ Set updated with image"),
            Err(e) => warn!("❌ Error: {}", e),
        }
    }

    info!("✅ Done!");
    Ok(())
}
