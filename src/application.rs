//! Application layer module
//!
//! Orchestrates the domain and infrastructure pieces into the sequential
//! sync pipeline.

pub mod pipeline;

pub use pipeline::{ImageSyncPipeline, RunSummary};
