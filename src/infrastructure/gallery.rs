//! Gallery image discovery for COBI product pages
//!
//! cobibricks.com lazy-loads its product photography, so the gallery image
//! can surface in `data-src`, plain `src`, or `srcset` depending on the page
//! variant. Candidates are collected from all three, resolved against the
//! page URL, deduplicated with the query string stripped, and the first
//! survivor is taken as the main image. The substring match and first-found
//! rule are deliberate: resolution scoring is out of scope.

use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::domain::constants::site;

#[derive(Error, Debug, Clone)]
pub enum GalleryError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid page URL: {url} - {reason}")]
    InvalidPageUrl { url: String, reason: String },
}

pub type GalleryResult<T> = Result<T, GalleryError>;

/// CSS selectors for locating candidate image elements
#[derive(Debug, Clone)]
pub struct GallerySelectors {
    /// Lazy-loaded images
    pub lazy_image: String,
    /// Eagerly-loaded images
    pub plain_image: String,
    /// Responsive source sets
    pub responsive_image: String,
}

impl Default for GallerySelectors {
    fn default() -> Self {
        Self {
            lazy_image: "img[data-src]".to_string(),
            plain_image: "img[src]".to_string(),
            responsive_image: "img[srcset]".to_string(),
        }
    }
}

/// Extracts gallery image URLs from product page markup
pub struct GalleryImageExtractor {
    selectors: GallerySelectors,
    marker: String,
}

impl Default for GalleryImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryImageExtractor {
    /// Create an extractor with the default selectors
    pub fn new() -> Self {
        Self::with_selectors(GallerySelectors::default())
    }

    /// Create an extractor with custom selectors
    pub fn with_selectors(selectors: GallerySelectors) -> Self {
        Self {
            selectors,
            marker: site::GALLERY_MARKER.to_string(),
        }
    }

    /// Discover the main gallery image of a product page.
    ///
    /// First surviving candidate wins. The returned URL keeps its query
    /// string; only deduplication compares with the query stripped.
    pub fn main_image(&self, html: &Html, page_url: &str) -> GalleryResult<Option<String>> {
        Ok(self.collect_candidates(html, page_url)?.into_iter().next())
    }

    /// All unique gallery candidates in discovery order: lazy-load
    /// attributes first, then plain sources, then srcset entries.
    pub fn collect_candidates(&self, html: &Html, page_url: &str) -> GalleryResult<Vec<String>> {
        let base = Url::parse(page_url).map_err(|e| GalleryError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut candidates: Vec<String> = Vec::new();

        for src in self.attribute_values(html, &self.selectors.lazy_image, "data-src")? {
            if self.is_gallery_url(&src) {
                if let Some(resolved) = resolve(&base, &src) {
                    candidates.push(resolved);
                }
            }
        }

        for src in self.attribute_values(html, &self.selectors.plain_image, "src")? {
            if self.is_gallery_url(&src) {
                if let Some(resolved) = resolve(&base, &src) {
                    if !candidates.contains(&resolved) {
                        candidates.push(resolved);
                    }
                }
            }
        }

        for srcset in self.attribute_values(html, &self.selectors.responsive_image, "srcset")? {
            // srcset entries are comma-separated "url descriptor" pairs
            for part in srcset.split(',') {
                let url_part = part.trim().split(' ').next().unwrap_or("");
                if url_part.is_empty() || !self.is_gallery_url(url_part) {
                    continue;
                }
                if let Some(resolved) = resolve(&base, url_part) {
                    if !candidates.contains(&resolved) {
                        candidates.push(resolved);
                    }
                }
            }
        }

        let unique = dedup_by_stripped_query(candidates);
        debug!("Found {} unique gallery candidates on {}", unique.len(), page_url);
        Ok(unique)
    }

    fn is_gallery_url(&self, src: &str) -> bool {
        src.to_ascii_lowercase().contains(&self.marker)
    }

    fn attribute_values(&self, html: &Html, selector: &str, attribute: &str) -> GalleryResult<Vec<String>> {
        let parsed = Selector::parse(selector).map_err(|e| GalleryError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(html
            .select(&parsed)
            .filter_map(|element| element.value().attr(attribute))
            .map(str::to_string)
            .collect())
    }
}

/// Resolve a candidate against the page URL; unresolvable candidates are
/// dropped rather than failing the page.
fn resolve(base: &Url, candidate: &str) -> Option<String> {
    base.join(candidate).ok().map(|url| url.to_string())
}

/// Keep the first occurrence per query-stripped URL, preserving order and
/// the original query string of the survivor.
fn dedup_by_stripped_query(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for candidate in candidates {
        let normalized = candidate
            .split('?')
            .next()
            .unwrap_or(candidate.as_str())
            .to_string();
        if seen.insert(normalized) {
            unique.push(candidate);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://cobibricks.com/product/uss-enterprise-cv-6,3322";

    fn extractor() -> GalleryImageExtractor {
        GalleryImageExtractor::new()
    }

    #[test]
    fn lazy_loaded_gallery_image_is_discovered() {
        let html = Html::parse_document(r#"<img data-src="/img/gallery/main.jpg?v=2">"#);

        let main = extractor().main_image(&html, PAGE_URL).unwrap();
        assert_eq!(
            main,
            Some("https://cobibricks.com/img/gallery/main.jpg?v=2".to_string())
        );
    }

    #[test]
    fn non_gallery_images_are_ignored_across_all_sources() {
        let html = Html::parse_document(
            r#"
            <img data-src="/img/hero/banner.jpg">
            <img src="/img/logo.png">
            <img srcset="/img/thumbs/a.jpg 1x, /img/thumbs/b.jpg 2x">
        "#,
        );

        let candidates = extractor().collect_candidates(&html, PAGE_URL).unwrap();
        assert!(candidates.is_empty());
        assert_eq!(extractor().main_image(&html, PAGE_URL).unwrap(), None);
    }

    #[test]
    fn duplicates_differing_only_by_query_keep_first() {
        let html = Html::parse_document(
            r#"
            <img data-src="/img/gallery/main.jpg?v=2">
            <img src="/img/gallery/main.jpg?v=7">
        "#,
        );

        let candidates = extractor().collect_candidates(&html, PAGE_URL).unwrap();
        assert_eq!(
            candidates,
            vec!["https://cobibricks.com/img/gallery/main.jpg?v=2".to_string()]
        );
    }

    #[test]
    fn lazy_load_source_wins_over_plain_and_srcset() {
        let html = Html::parse_document(
            r#"
            <img srcset="/img/gallery/small.jpg 1x">
            <img src="/img/gallery/plain.jpg">
            <img data-src="/img/gallery/lazy.jpg">
        "#,
        );

        let candidates = extractor().collect_candidates(&html, PAGE_URL).unwrap();
        assert_eq!(
            candidates,
            vec![
                "https://cobibricks.com/img/gallery/lazy.jpg".to_string(),
                "https://cobibricks.com/img/gallery/plain.jpg".to_string(),
                "https://cobibricks.com/img/gallery/small.jpg".to_string(),
            ]
        );
        assert_eq!(
            extractor().main_image(&html, PAGE_URL).unwrap(),
            Some("https://cobibricks.com/img/gallery/lazy.jpg".to_string())
        );
    }

    #[test]
    fn srcset_entries_take_the_url_part() {
        let html = Html::parse_document(
            r#"<img srcset="/img/gallery/a.jpg 480w, /img/gallery/b.jpg 800w,">"#,
        );

        let candidates = extractor().collect_candidates(&html, PAGE_URL).unwrap();
        assert_eq!(
            candidates,
            vec![
                "https://cobibricks.com/img/gallery/a.jpg".to_string(),
                "https://cobibricks.com/img/gallery/b.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn absolute_candidates_are_left_on_their_host() {
        let html = Html::parse_document(
            r#"<img data-src="https://cdn.cobibricks.com/img/gallery/main.jpg">"#,
        );

        let main = extractor().main_image(&html, PAGE_URL).unwrap();
        assert_eq!(
            main,
            Some("https://cdn.cobibricks.com/img/gallery/main.jpg".to_string())
        );
    }

    #[test]
    fn marker_match_is_case_insensitive() {
        let html = Html::parse_document(r#"<img data-src="/img/Gallery/Main.JPG">"#);

        let main = extractor().main_image(&html, PAGE_URL).unwrap();
        assert_eq!(
            main,
            Some("https://cobibricks.com/img/Gallery/Main.JPG".to_string())
        );
    }

    #[test]
    fn discovery_is_deterministic() {
        let html = Html::parse_document(
            r#"
            <img data-src="/img/gallery/one.jpg">
            <img src="/img/gallery/two.jpg">
        "#,
        );

        let first = extractor().main_image(&html, PAGE_URL).unwrap();
        let second = extractor().main_image(&html, PAGE_URL).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_page_url_is_an_error() {
        let html = Html::parse_document(r#"<img data-src="/img/gallery/main.jpg">"#);

        let result = extractor().main_image(&html, "not a url");
        assert!(matches!(result, Err(GalleryError::InvalidPageUrl { .. })));
    }
}
