//! Reload Notifier Port
//!
//! Tasks call this after a successful write. The dev server's reload hub is
//! the real implementation; builds without a server use [`NoopNotifier`].

use std::path::PathBuf;

use serde::Serialize;

/// Client-visible reload signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReloadKind {
    /// Refresh the listed output paths in place where possible
    Inject { paths: Vec<PathBuf> },
    /// Reload the whole page
    FullPage,
}

/// Trait for delivering reload signals to browsers
pub trait ReloadNotifier: Send + Sync {
    fn notify(&self, kind: ReloadKind);
}

/// No-op notifier for builds without a dev server
pub struct NoopNotifier;

impl ReloadNotifier for NoopNotifier {
    fn notify(&self, _kind: ReloadKind) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test notifier that records all signals
    #[derive(Clone, Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) signals: Arc<Mutex<Vec<ReloadKind>>>,
    }

    impl RecordingNotifier {
        pub(crate) fn recorded(&self) -> Vec<ReloadKind> {
            self.signals.lock().unwrap().clone()
        }
    }

    impl ReloadNotifier for RecordingNotifier {
        fn notify(&self, kind: ReloadKind) {
            self.signals.lock().unwrap().push(kind);
        }
    }
}
