//! Debounce state for the watch loop

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Changed paths waiting for a quiet period
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
    quiet: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherState {
    pub fn new() -> Self {
        Self::with_quiet_period(Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_quiet_period(quiet: Duration) -> Self {
        Self {
            pending_changes: BTreeSet::new(),
            last_change: None,
            quiet,
        }
    }

    /// Record a change; every change restarts the quiet period.
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// True once changes are pending and nothing arrived for the quiet period
    pub fn should_sync(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.quiet,
            None => false,
        }
    }

    /// Drain the pending batch in path order.
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes).into_iter().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
