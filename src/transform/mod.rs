//! Transform tasks
//!
//! Each task reads its sources, walks its [`StepPlan`] and returns the
//! artifacts to write. Writing, size reporting and reload signalling belong
//! to the task runner, so tasks stay pure apart from reading input.

pub mod assets;
pub mod files;
pub mod html;
pub mod script;
pub mod style;

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::ArtifactSet;
use crate::domain::policies::StepPlan;
use crate::domain::ports::Clock;
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::BuildResult;

pub use assets::AssetsTask;
pub use html::HtmlTask;
pub use script::ScriptTask;
pub use style::StyleTask;

/// A leaf build task
pub trait Task: Send + Sync {
    fn kind(&self) -> TaskKind;

    fn plan(&self) -> &StepPlan;

    /// Read sources and produce artifacts; never writes.
    fn run(&self) -> BuildResult<ArtifactSet>;
}

/// Construct the task for `kind`.
pub fn build_task(
    kind: TaskKind,
    root: &Path,
    config: &Config,
    env: BuildEnv,
    clock: Arc<dyn Clock>,
) -> Box<dyn Task> {
    match kind {
        TaskKind::Html => Box::new(HtmlTask::new(root, config, env, clock)),
        TaskKind::Css => Box::new(StyleTask::new(root, config, env)),
        TaskKind::Javascript => Box::new(ScriptTask::new(root, config, env)),
        TaskKind::Assets => Box::new(AssetsTask::new(root, config, env)),
    }
}
