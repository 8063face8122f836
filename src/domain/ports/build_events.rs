//! Build Event Port
//!
//! The task runner, pipeline and watch loop report progress through this
//! port. The console logger is the real sink; tests record events.

use std::path::PathBuf;

use crate::domain::value_objects::{BuildEnv, TaskKind};

/// Event emitted while building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// A task began
    TaskStarted { task: TaskKind },

    /// An artifact was written under the output root
    ArtifactWritten {
        task: TaskKind,
        path: PathBuf,
        size: u64,
    },

    /// A task finished successfully
    TaskFinished { task: TaskKind },

    /// A task failed; the build carries on
    TaskFailed { task: TaskKind, message: String },

    /// Free-form progress note
    Info { message: String },

    /// Non-task failure worth reporting (clean, config reload)
    Warning { message: String },

    /// A batch of watched files changed
    FilesChanged { paths: Vec<PathBuf> },

    /// A full pass completed
    Completed {
        env: BuildEnv,
        output: PathBuf,
        server_url: Option<String>,
        elapsed_ms: u128,
        failed: usize,
    },
}

/// Trait for receiving build events
pub trait BuildEventSink: Send + Sync {
    fn on_event(&self, event: BuildEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test sink that records all events
    #[derive(Clone, Default)]
    pub(crate) struct RecordingEventSink {
        pub(crate) events: Arc<Mutex<Vec<BuildEvent>>>,
    }

    impl RecordingEventSink {
        pub(crate) fn recorded(&self) -> Vec<BuildEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl BuildEventSink for RecordingEventSink {
        fn on_event(&self, event: BuildEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
