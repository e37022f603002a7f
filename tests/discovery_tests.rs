//! End-to-end discovery and pipeline behavior through the public API

use scraper::Html;

use cobi_image_sync_lib::application::ImageSyncPipeline;
use cobi_image_sync_lib::domain::{ProductCatalog, ProductSource};
use cobi_image_sync_lib::infrastructure::image_store::StoredImage;
use cobi_image_sync_lib::infrastructure::{GalleryImageExtractor, ImageStore, PageClient};

const ENTERPRISE_PAGE: &str = "https://cobibricks.com/product/uss-enterprise-cv-6,3322";

#[test]
fn set_4833_discovery_example() {
    // The documented end-to-end example: a lazy-loaded gallery image with a
    // cache-busting query resolves against the product page
    let html = Html::parse_document(
        r#"
        <html><body>
            <img src="/img/logo.png">
            <img data-src="/img/gallery/main.jpg?v=2">
            <img data-src="/img/gallery/alt-angle.jpg">
        </body></html>
    "#,
    );

    let extractor = GalleryImageExtractor::new();
    let main = extractor.main_image(&html, ENTERPRISE_PAGE).unwrap();
    assert_eq!(
        main,
        Some("https://cobibricks.com/img/gallery/main.jpg?v=2".to_string())
    );
}

#[test]
fn discovery_called_twice_returns_the_same_candidate() {
    let document = r#"
        <img srcset="/img/gallery/a.jpg 480w, /img/gallery/b.jpg 800w">
        <img src="/img/gallery/c.jpg?size=large">
    "#;

    let extractor = GalleryImageExtractor::new();
    let first = extractor
        .main_image(&Html::parse_document(document), ENTERPRISE_PAGE)
        .unwrap();
    let second = extractor
        .main_image(&Html::parse_document(document), ENTERPRISE_PAGE)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        Some("https://cobibricks.com/img/gallery/c.jpg?size=large".to_string())
    );
}

#[test]
fn builtin_catalog_drives_iteration_order() {
    let catalog = ProductCatalog::builtin();
    let first = catalog.iter().next().unwrap();
    assert_eq!(first.set_number, "4833");
    assert_eq!(
        first.product_url,
        "https://cobibricks.com/product/uss-enterprise-cv-6,3322"
    );
}

#[tokio::test]
async fn predownloaded_image_survives_a_full_pipeline_pass() {
    // Seed the store with 4833.jpg, then run a single-entry pipeline whose
    // page fetch cannot succeed. The pre-seeded file must be untouched and
    // the run must still complete.
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());
    store.ensure_dir().await.unwrap();
    let seeded = store.path_for("4833.jpg");
    tokio::fs::write(&seeded, b"seeded").await.unwrap();

    let pipeline = ImageSyncPipeline::new(
        PageClient::new().unwrap(),
        GalleryImageExtractor::new(),
        ImageStore::new(dir.path()),
        None,
    );
    let catalog = ProductCatalog::new(vec![ProductSource::new(
        "4833",
        "http://127.0.0.1:9/product/uss-enterprise",
    )]);

    let summary = pipeline.run(&catalog).await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failures, 1);

    let content = tokio::fs::read(&seeded).await.unwrap();
    assert_eq!(content, b"seeded");
}

#[tokio::test]
async fn existing_file_short_circuits_the_download() {
    let dir = tempfile::tempdir().unwrap();
    let store = ImageStore::new(dir.path());
    store.ensure_dir().await.unwrap();
    tokio::fs::write(store.path_for("2572.jpg"), b"tank").await.unwrap();

    let client = PageClient::new().unwrap();
    let stored = store
        .download(&client, "http://127.0.0.1:9/would-fail.jpg", "2572.jpg")
        .await
        .unwrap();

    assert!(matches!(stored, StoredImage::AlreadyExists(_)));
}
