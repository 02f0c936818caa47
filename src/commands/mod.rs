//! Command handlers for the lvmeta CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod config;
pub mod scan;

use anyhow::Result;
use std::path::Path;

use lvmeta::Config;

/// Load the config from an explicit path, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Pad a name to `width` display columns.
pub fn pad_name(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len >= width {
        name.to_string()
    } else {
        format!("{}{}", name, " ".repeat(width - len))
    }
}
