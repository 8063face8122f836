//! Watch loop
//!
//! Collects filesystem events, debounces them into batches and runs the
//! actions the batch subscribes to. Task failures are logged and the loop
//! keeps going; only watcher start-up failures are returned.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::pipeline::BuildContext;
use crate::config::load_for_project;
use crate::domain::ports::{BuildEvent, ReloadKind};
use crate::error::{BuildError, BuildResult};

use super::event::WatcherState;
use super::subscription::{actions_for, subscriptions, WatchAction, WatchSubscription};

pub struct WatchUseCase {
    ctx: BuildContext,
    subscriptions: Vec<WatchSubscription>,
}

impl WatchUseCase {
    pub fn new(ctx: BuildContext) -> BuildResult<Self> {
        let config_file = ctx.config_path.strip_prefix(&ctx.root).ok();
        let subscriptions = subscriptions(&ctx.config, config_file)?;
        Ok(Self { ctx, subscriptions })
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    pub fn subscriptions(&self) -> &[WatchSubscription] {
        &self.subscriptions
    }

    /// Watch the project root until `running` is cleared.
    pub fn start(mut self, running: Arc<AtomicBool>) -> BuildResult<()> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_access() {
                        return;
                    }
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| BuildError::Watch(e.to_string()))?;

        watcher
            .watch(&self.ctx.root, RecursiveMode::Recursive)
            .map_err(|e| BuildError::Watch(format!("{}: {e}", self.ctx.root.display())))?;

        let root = self
            .ctx
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.ctx.root.clone());
        let mut state = WatcherState::new();

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                let out = root.join(&self.ctx.config.paths.out);
                if let Some(relative) = relative_change(&root, &out, &path) {
                    state.add_change(relative);
                }
            }

            if state.should_sync() {
                let changes = state.take_changes();
                self.handle_changes(&changes);
            }
        }

        Ok(())
    }

    /// Run the actions for one debounced batch of root-relative paths.
    pub fn handle_changes(&mut self, changed: &[PathBuf]) -> Vec<WatchAction> {
        let actions = actions_for(&self.subscriptions, changed);
        if actions.is_empty() {
            return actions;
        }

        self.ctx.events.on_event(BuildEvent::FilesChanged {
            paths: changed.to_vec(),
        });
        for action in &actions {
            self.apply(*action);
        }
        actions
    }

    fn apply(&mut self, action: WatchAction) {
        match action {
            WatchAction::Run(task) => {
                self.ctx.runner().run(self.ctx.task(task).as_ref());
            }
            WatchAction::RunThenFullReload(task) => {
                self.ctx.runner().run(self.ctx.task(task).as_ref());
                self.ctx.notifier.notify(ReloadKind::FullPage);
            }
            WatchAction::ReloadConfigThenRun(task) => {
                if self.reload_config() {
                    self.ctx.runner().run(self.ctx.task(task).as_ref());
                }
            }
        }
    }

    /// Pick up utility and browser-target settings from the configuration
    /// file. On failure the previous settings stay in effect.
    fn reload_config(&mut self) -> bool {
        match load_for_project(&self.ctx.root, Some(&self.ctx.config_path)) {
            Ok(loaded) => {
                for warning in &loaded.warnings {
                    self.ctx.events.on_event(BuildEvent::Warning {
                        message: warning.to_string(),
                    });
                }
                self.ctx.config.utility = loaded.config.utility;
                self.ctx.config.style = loaded.config.style;
                self.ctx.events.on_event(BuildEvent::Info {
                    message: "Configuration reloaded".to_string(),
                });
                true
            }
            Err(e) => {
                self.ctx.events.on_event(BuildEvent::Warning {
                    message: format!("Configuration not reloaded: {e}"),
                });
                false
            }
        }
    }
}

/// `path` relative to `root`, or `None` when it lies outside the root or
/// inside the output directory.
pub fn relative_change(root: &Path, out: &Path, path: &Path) -> Option<PathBuf> {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if path.starts_with(out) {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(relative.to_path_buf())
}
