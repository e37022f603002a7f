//! Infrastructure layer for HTTP, parsing, storage, and external integrations

pub mod config; // Environment-driven configuration
pub mod gallery; // Gallery image discovery
pub mod http_client; // Page and image fetching
pub mod image_store; // Local image storage
pub mod logging; // Logging infrastructure
pub mod strapi; // Strapi backend client

// Re-export commonly used items
pub use config::AppConfig;
pub use gallery::GalleryImageExtractor;
pub use http_client::PageClient;
pub use image_store::{ImageStore, StoredImage};
pub use strapi::StrapiClient;
