//! Logging setup for the lvmeta binary
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary (or to an embedding application).

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "lvmeta=debug"
    } else {
        "lvmeta=warn"
    }
}

/// Install a stderr `fmt` subscriber.
///
/// Respects `RUST_LOG` if set, otherwise uses [`default_filter`].
pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
