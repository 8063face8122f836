//! Default command: development server with live reload

use std::path::Path;

use anyhow::{Context, Result};

use assetline::Pipeline;

use crate::commands::{install_interrupt_handler, Session};

pub fn cmd_dev(root: &Path, config: Option<&Path>) -> Result<()> {
    let session = Session::open(root, config)?;
    let running = install_interrupt_handler(session.ui)?;

    Pipeline::new(session.ctx)
        .development(running)
        .context("Development server failed")
}
