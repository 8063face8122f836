//! Command handlers
//!
//! Each handler resolves the project, loads configuration and drives one
//! library entry point. Per-task failures are logged by the library and do
//! not change the exit code.

pub mod build;
pub mod clean;
pub mod dev;
pub mod task;
pub mod watch;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use assetline::config::load_for_project;
use assetline::{BuildContext, BuildEnv};

use crate::ui::context::UiContext;
use crate::ui::logger::BuildLogger;
use crate::ui::output::print_config_warnings;
use crate::ui::primitives::icon::Icon;

/// Everything a command needs to run
pub struct Session {
    pub ctx: BuildContext,
    pub ui: UiContext,
}

impl Session {
    pub fn open(root: &Path, config: Option<&Path>) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Project root not found: {}", root.display()))?;
        let loaded = load_for_project(&root, config).context("Failed to load configuration")?;

        let ui = UiContext::new(&loaded.config);
        print_config_warnings(&loaded.warnings, ui.unicode);

        let ctx = BuildContext::new(root, loaded.config, loaded.path, BuildEnv::from_env())
            .with_events(Arc::new(BuildLogger::new(ui)));
        Ok(Self { ctx, ui })
    }
}

/// Ctrl+C prints a notice and exits at once.
pub fn install_interrupt_handler(ui: UiContext) -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
        eprintln!("\n{} Stopped", Icon::Watch.colored(ui.color, ui.unicode));
        std::process::exit(0);
    })
    .context("Failed to install Ctrl+C handler")?;

    Ok(running)
}
