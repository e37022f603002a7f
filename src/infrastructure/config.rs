//! Runtime configuration loaded from the environment
//!
//! Configuration comes from environment variables (with optional `.env`
//! support in the binaries):
//! - `STRAPI_URL`: backend base URL
//! - `STRAPI_TOKEN`: bearer credential; absent means download-only mode
//! - `COBI_IMAGES_DIR`: local directory for downloaded images

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::constants::{backend, download, site};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Strapi backend settings
    pub backend: BackendConfig,

    /// Page fetching and image download settings
    pub download: DownloadConfig,
}

/// Strapi backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Strapi instance
    pub base_url: String,

    /// Bearer credential; `None` switches the run to download-only mode
    pub api_token: Option<String>,

    /// Query and update timeout in seconds
    pub request_timeout_seconds: u64,

    /// Media upload timeout in seconds
    pub upload_timeout_seconds: u64,
}

/// Page fetching and image download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory where images are stored
    pub images_dir: PathBuf,

    /// Page fetch and image download timeout in seconds
    pub request_timeout_seconds: u64,

    /// User agent sent with source-site requests
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: backend::DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout_seconds: backend::REQUEST_TIMEOUT_SECONDS,
            upload_timeout_seconds: backend::UPLOAD_TIMEOUT_SECONDS,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(download::DEFAULT_IMAGES_DIR),
            request_timeout_seconds: download::REQUEST_TIMEOUT_SECONDS,
            user_agent: site::USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = non_empty_var("STRAPI_URL")
            .unwrap_or_else(|| backend::DEFAULT_BASE_URL.to_string());
        let api_token = non_empty_var("STRAPI_TOKEN");
        let images_dir = non_empty_var("COBI_IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(download::DEFAULT_IMAGES_DIR));

        Self {
            backend: BackendConfig {
                base_url,
                api_token,
                ..BackendConfig::default()
            },
            download: DownloadConfig {
                images_dir,
                ..DownloadConfig::default()
            },
        }
    }

    /// Whether the upload/link phase will run.
    pub fn upload_enabled(&self) -> bool {
        self.backend.api_token.is_some()
    }
}

/// Set and non-empty environment variable, or `None`.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
