//! assetline CLI - static front-end asset pipeline
//!
//! Usage: assetline [--root <DIR>] [--config <FILE>] [COMMAND]
//!
//! Commands:
//!   clean   Delete the output directory
//!   css     Run the style task once
//!   js      Run the script task once
//!   html    Run the HTML task once
//!   build   Clean, run every task in parallel and report
//!   watch   Watch for changes and rebuild
//!   (none)  Development server with live reload

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use assetline::TaskKind;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.root.as_path();
    let config = cli.config.as_deref();

    match cli.command {
        None => commands::dev::cmd_dev(root, config),
        Some(Commands::Clean) => commands::clean::cmd_clean(root, config),
        Some(Commands::Css) => commands::task::cmd_task(root, config, TaskKind::Css),
        Some(Commands::Js) => commands::task::cmd_task(root, config, TaskKind::Javascript),
        Some(Commands::Html) => commands::task::cmd_task(root, config, TaskKind::Html),
        Some(Commands::Build) => commands::build::cmd_build(root, config),
        Some(Commands::Watch) => commands::watch::cmd_watch(root, config),
    }
}
