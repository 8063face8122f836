//! Build command handler

use std::path::Path;

use anyhow::Result;

use assetline::Pipeline;

use crate::commands::Session;

/// Clean, run every task in parallel, report. The environment comes from
/// `ASSETLINE_ENV`.
pub fn cmd_build(root: &Path, config: Option<&Path>) -> Result<()> {
    let session = Session::open(root, config)?;
    Pipeline::new(session.ctx).production();
    Ok(())
}
