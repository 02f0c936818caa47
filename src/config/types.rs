//! Configuration type definitions and defaults

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::prefetch::DEFAULT_THREAD_NAME;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prefetch: PrefetchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Background prefetch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Read pixel dimensions for image files
    #[serde(default = "default_probe_image_dimensions")]
    pub probe_image_dimensions: bool,
    /// Name given to the worker thread
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
    /// How long `scan` waits for outstanding results, in milliseconds
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,
}

pub fn default_probe_image_dimensions() -> bool {
    true
}

pub fn default_thread_name() -> String {
    DEFAULT_THREAD_NAME.to_string()
}

pub fn default_settle_timeout_ms() -> u64 {
    5000
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            probe_image_dimensions: default_probe_image_dimensions(),
            thread_name: default_thread_name(),
            settle_timeout_ms: default_settle_timeout_ms(),
        }
    }
}

/// Output formatting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for modification times
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

pub fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl DisplayConfig {
    /// Reject date formats chrono cannot render
    pub fn validate(&self) -> Result<(), String> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "display.date_format '{}' is not a valid strftime format",
                self.date_format
            ));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}
