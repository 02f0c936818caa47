//! lvmeta - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use lvmeta::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    lvmeta::logging::init(cli.verbose)?;

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            dir,
            recursive,
            edit,
            no_images,
        } => commands::scan::handle(&config, &dir, recursive, &edit, no_images),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(cli.config.as_deref()),
        },
    }
}
