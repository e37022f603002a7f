//! Logging initialization
//!
//! Console logging via tracing-subscriber. The default level is `info`;
//! `RUST_LOG` overrides it per module.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Initialize the logging system. Safe to call once per process.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
