use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// assetline - static front-end asset pipeline
#[derive(Parser, Debug)]
#[command(name = "assetline")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Run 'assetline' without a command for the development server with live reload.\nSet ASSETLINE_ENV=production for minified output."
)]
pub struct Cli {
    /// Project root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (default: <root>/assetline.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Delete the output directory
    Clean,

    /// Run the style task once
    Css,

    /// Run the script task once
    Js,

    /// Run the HTML task once
    Html,

    /// Clean, run every task in parallel and report
    Build,

    /// Watch for changes and rebuild (no initial pass, no server)
    Watch,
}
