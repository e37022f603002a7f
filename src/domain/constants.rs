//! Site characteristics and domain constants
//!
//! Fixed properties of cobibricks.com and defaults for a sync run.

/// cobibricks.com site constants
pub mod site {
    /// Substring that marks a product image as part of the gallery
    pub const GALLERY_MARKER: &str = "gallery";

    /// cobibricks.com serves the full product markup only to ordinary
    /// browser traffic, so requests carry browser headers
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    /// Accept header sent with page and image requests
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

    /// Accept-Language header sent with page and image requests
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,de;q=0.8";
}

/// Download-phase defaults
pub mod download {
    /// Page fetch and image download timeout (seconds)
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Directory where downloaded images are stored
    pub const DEFAULT_IMAGES_DIR: &str = "images";
}

/// Strapi backend defaults
pub mod backend {
    /// Base URL of a local Strapi instance
    pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

    /// Query and update timeout (seconds)
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Media upload timeout (seconds)
    pub const UPLOAD_TIMEOUT_SECONDS: u64 = 60;
}
