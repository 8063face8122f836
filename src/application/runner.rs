//! Task runner
//!
//! Wraps a [`Task`] with everything that is not transformation: writing the
//! artifacts, reporting sizes, signalling reload and logging. A failing or
//! panicking task is reported and turned into [`TaskOutcome::Failed`]; it
//! never propagates.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::ArtifactSet;
use crate::domain::policies::Step;
use crate::domain::ports::{BuildEvent, BuildEventSink, ReloadKind, ReloadNotifier};
use crate::domain::value_objects::TaskKind;
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::LocalFs;
use crate::transform::Task;

/// Result of one task run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Built {
        task: TaskKind,
        artifacts: usize,
        bytes: u64,
    },
    Failed {
        task: TaskKind,
        message: String,
    },
}

impl TaskOutcome {
    pub fn task(&self) -> TaskKind {
        match self {
            TaskOutcome::Built { task, .. } | TaskOutcome::Failed { task, .. } => *task,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed { .. })
    }
}

/// Runs tasks against one output root
#[derive(Clone)]
pub struct TaskRunner {
    out_dir: PathBuf,
    fs: LocalFs,
    events: Arc<dyn BuildEventSink>,
    notifier: Arc<dyn ReloadNotifier>,
}

impl TaskRunner {
    pub fn new(
        out_dir: impl Into<PathBuf>,
        events: Arc<dyn BuildEventSink>,
        notifier: Arc<dyn ReloadNotifier>,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            fs: LocalFs::new(),
            events,
            notifier,
        }
    }

    pub fn out_dir(&self) -> &std::path::Path {
        &self.out_dir
    }

    pub fn run(&self, task: &dyn Task) -> TaskOutcome {
        let kind = task.kind();
        self.events.on_event(BuildEvent::TaskStarted { task: kind });

        let built = panic::catch_unwind(AssertUnwindSafe(|| self.build(task)))
            .unwrap_or_else(|payload| Err(panicked(payload.as_ref())));

        match built {
            Ok(artifacts) => {
                let plan = task.plan();
                if plan.contains(Step::ReportSize) {
                    for artifact in artifacts.iter() {
                        self.events.on_event(BuildEvent::ArtifactWritten {
                            task: kind,
                            path: artifact.path().to_path_buf(),
                            size: artifact.size(),
                        });
                    }
                }
                if plan.contains(Step::Reload) {
                    self.notifier.notify(ReloadKind::Inject {
                        paths: artifacts.reload_paths(),
                    });
                }
                self.events.on_event(BuildEvent::TaskFinished { task: kind });
                TaskOutcome::Built {
                    task: kind,
                    artifacts: artifacts.len(),
                    bytes: artifacts.total_size(),
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.events.on_event(BuildEvent::TaskFailed {
                    task: kind,
                    message: message.clone(),
                });
                TaskOutcome::Failed {
                    task: kind,
                    message,
                }
            }
        }
    }

    fn build(&self, task: &dyn Task) -> BuildResult<ArtifactSet> {
        let artifacts = task.run()?;
        if task.plan().contains(Step::Write) {
            for artifact in artifacts.iter() {
                self.fs
                    .write_atomic(&self.out_dir.join(artifact.path()), artifact.contents())?;
            }
        }
        Ok(artifacts)
    }
}

fn panicked(payload: &(dyn Any + Send)) -> BuildError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    BuildError::Panicked { detail }
}
