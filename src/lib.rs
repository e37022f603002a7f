//! COBI Image Sync - gallery image scraper with Strapi integration
//!
//! This crate downloads product gallery images from cobibricks.com and
//! optionally uploads them to a Strapi backend, linking each asset to the
//! matching set record.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
