//! CLI definitions for lvmeta
//!
//! Kept in the library so the argument structure can be unit-tested without
//! spawning the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build clap styles for the help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "lvmeta")]
#[command(about = "Prefetch file metadata for list views on a background thread")]
#[command(
    long_about = "lvmeta lists a directory the way a list view would and fetches each
entry's metadata (size, kind, modification time, image dimensions) on a single
background worker, printing the results in list order.

EXAMPLES:
    lvmeta scan ~/Pictures                  List and prefetch a directory
    lvmeta scan . --recursive               Include subdirectories
    lvmeta scan . --edit notes.txt          Suppress results for an entry under edit
    lvmeta config show                      Show the effective configuration"
)]
#[command(version, styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/lvmeta/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a directory and prefetch metadata for every entry
    Scan {
        /// Directory to list
        dir: PathBuf,
        /// Descend into subdirectories
        #[arg(long, short)]
        recursive: bool,
        /// Treat the named entry as under edit (repeatable)
        #[arg(long, value_name = "NAME")]
        edit: Vec<String>,
        /// Skip reading image dimensions
        #[arg(long)]
        no_images: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}
