//! Single-task command handler (`css`, `js`, `html`)

use std::path::Path;

use anyhow::Result;

use assetline::{Pipeline, TaskKind};

use crate::commands::Session;

pub fn cmd_task(root: &Path, config: Option<&Path>, task: TaskKind) -> Result<()> {
    let session = Session::open(root, config)?;
    Pipeline::new(session.ctx).run_single(task);
    Ok(())
}
