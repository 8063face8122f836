//! Watch command handler

use std::path::Path;

use anyhow::{Context, Result};

use assetline::application::WatchUseCase;
use assetline::domain::ports::BuildEvent;

use crate::commands::{install_interrupt_handler, Session};

pub fn cmd_watch(root: &Path, config: Option<&Path>) -> Result<()> {
    let session = Session::open(root, config)?;
    let running = install_interrupt_handler(session.ui)?;

    session.ctx.events.on_event(BuildEvent::Info {
        message: format!("Watching {}", session.ctx.root.display()),
    });

    WatchUseCase::new(session.ctx)
        .and_then(|watch| watch.start(running))
        .context("Watcher failed")
}
