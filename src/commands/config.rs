//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use lvmeta::Config;

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the config file path in use.
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", Config::config_path()?.display()),
    }
    Ok(())
}
