//! Clean command handler

use std::path::Path;

use anyhow::{Context, Result};

use assetline::application::OutputDir;

use crate::commands::Session;
use crate::ui::primitives::icon::Icon;

pub fn cmd_clean(root: &Path, config: Option<&Path>) -> Result<()> {
    let session = Session::open(root, config)?;
    let output = OutputDir::new(session.ctx.out_dir());

    output
        .clean()
        .with_context(|| format!("Failed to clean {}", output.path().display()))?;

    println!(
        "{} Cleaned {}",
        Icon::Clean.colored(session.ui.color, session.ui.unicode),
        output.path().display()
    );
    Ok(())
}
