//! Watch subscriptions: which file changes trigger which task

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::config::Config;
use crate::domain::value_objects::TaskKind;
use crate::error::{BuildError, BuildResult};
use crate::transform::files::{glob_base, matches};

/// What to do when a subscription matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchAction {
    /// Rebuild the task; its own reload signal follows
    Run(TaskKind),
    /// Rebuild the task, then reload every page
    RunThenFullReload(TaskKind),
    /// Re-read the configuration file, then rebuild the task
    ReloadConfigThenRun(TaskKind),
}

impl WatchAction {
    pub fn task(&self) -> TaskKind {
        match self {
            WatchAction::Run(task)
            | WatchAction::RunThenFullReload(task)
            | WatchAction::ReloadConfigThenRun(task) => *task,
        }
    }
}

/// Glob pattern (relative to the project root) bound to an action
#[derive(Debug, Clone)]
pub struct WatchSubscription {
    pattern: Pattern,
    action: WatchAction,
}

impl WatchSubscription {
    pub fn new(pattern: &str, action: WatchAction) -> BuildResult<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| BuildError::Pattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
        Ok(Self { pattern, action })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn action(&self) -> WatchAction {
        self.action
    }

    pub fn matches(&self, relative: &Path) -> bool {
        matches(&self.pattern, relative)
    }
}

fn under(base: &Path, tail: &str) -> String {
    if base.as_os_str().is_empty() {
        tail.to_string()
    } else {
        format!("{}/{tail}", base.to_string_lossy().replace('\\', "/"))
    }
}

/// Subscriptions for a project. `config_file` is relative to the project root;
/// a configuration file elsewhere is not watched.
pub fn subscriptions(
    config: &Config,
    config_file: Option<&Path>,
) -> BuildResult<Vec<WatchSubscription>> {
    let paths = &config.paths;
    let css_dir = Path::new(&paths.style_entry)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut subs = vec![
        WatchSubscription::new(&under(&css_dir, "**/*.css"), WatchAction::Run(TaskKind::Css))?,
        WatchSubscription::new(
            &under(&glob_base(&paths.scripts), "**/*.js"),
            WatchAction::Run(TaskKind::Javascript),
        )?,
        WatchSubscription::new(
            &under(Path::new(&paths.src), "**/*.html"),
            WatchAction::RunThenFullReload(TaskKind::Html),
        )?,
        WatchSubscription::new(&paths.images, WatchAction::Run(TaskKind::Assets))?,
    ];

    if let Some(file) = config_file {
        let literal = Pattern::escape(&file.to_string_lossy().replace('\\', "/"));
        subs.push(WatchSubscription::new(
            &literal,
            WatchAction::ReloadConfigThenRun(TaskKind::Css),
        )?);
    }

    Ok(subs)
}

/// Actions for a batch of changed paths, in subscription order, each once.
///
/// A configuration reload already rebuilds its task, so a plain run of the
/// same task is dropped.
pub fn actions_for(subs: &[WatchSubscription], changed: &[PathBuf]) -> Vec<WatchAction> {
    let mut actions: Vec<WatchAction> = Vec::new();
    for sub in subs {
        if changed.iter().any(|path| sub.matches(path)) && !actions.contains(&sub.action) {
            actions.push(sub.action);
        }
    }

    let reloads: Vec<TaskKind> = actions
        .iter()
        .filter_map(|a| match a {
            WatchAction::ReloadConfigThenRun(task) => Some(*task),
            _ => None,
        })
        .collect();
    actions.retain(|a| !matches!(a, WatchAction::Run(task) if reloads.contains(task)));
    actions
}
