//! HTTP client for fetching product pages and image payloads
//!
//! Thin wrapper over a configured `reqwest::Client` that mimics an ordinary
//! browser session. Each request is a single attempt with a bounded timeout;
//! failures are returned to the caller, which decides whether to skip.

use anyhow::{Result, anyhow};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::constants::site;
use crate::infrastructure::config::DownloadConfig;

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct PageClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl PageClientConfig {
    /// Create PageClientConfig from the download settings
    pub fn from_download_config(download: &DownloadConfig) -> Self {
        Self {
            timeout_seconds: download.request_timeout_seconds,
            user_agent: download.user_agent.clone(),
            follow_redirects: true,
        }
    }
}

impl Default for PageClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: site::USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

/// HTTP client for the source site
#[derive(Clone)]
pub struct PageClient {
    client: Client,
    config: PageClientConfig,
}

impl PageClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(PageClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: PageClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(site::ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(site::ACCEPT_LANGUAGE));

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// Fetch a page body as text. Non-2xx statuses are errors.
    ///
    /// Returns the body as a string so callers can parse it without holding
    /// a non-Send document across await points.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.fetch_response(url).await?;

        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?;

        if body.is_empty() {
            return Err(anyhow!("Empty response from {}", url));
        }

        Ok(body)
    }

    /// Fetch a raw payload (image bytes) verbatim.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.fetch_response(url).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read response body: {}", e))?;

        Ok(body.to_vec())
    }

    async fn fetch_response(&self, url: &str) -> Result<Response> {
        debug!("timeout={}s", self.config.timeout_seconds);
        info!("🌐 HTTP GET: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error {}: {}", response.status(), url));
        }

        Ok(response)
    }
}
