//! Reload hub: sequenced signal history with long-poll waiting

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::ports::{ReloadKind, ReloadNotifier};

/// How long a poll request waits for a signal before answering empty
pub const POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Signals retained for clients that were between polls
const HISTORY: usize = 32;

/// A reload signal with its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub seq: u64,
    #[serde(flatten)]
    pub kind: ReloadKind,
}

/// Poll response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollResponse {
    /// Latest sequence number; the client sends it back as `since`
    pub seq: u64,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Default)]
struct HubState {
    latest: u64,
    recent: VecDeque<Signal>,
}

/// Broadcasts reload signals to every polling browser
#[derive(Debug)]
pub struct ReloadHub {
    state: Mutex<HubState>,
    changed: Condvar,
    timeout: Duration,
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadHub {
    pub fn new() -> Self {
        Self::with_timeout(POLL_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            state: Mutex::new(HubState::default()),
            changed: Condvar::new(),
            timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn latest(&self) -> u64 {
        self.lock().latest
    }

    /// Signals newer than `since`, without waiting.
    pub fn since(&self, since: u64) -> PollResponse {
        collect(&self.lock(), since)
    }

    /// Block until a signal newer than `since` exists or the timeout passes.
    pub fn wait_since(&self, since: u64) -> PollResponse {
        let deadline = Instant::now() + self.timeout;
        let mut state = self.lock();
        while state.latest == since {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let (guard, _) = self
                .changed
                .wait_timeout(state, remaining)
                .unwrap_or_else(|e| e.into_inner());
            state = guard;
        }
        collect(&state, since)
    }
}

fn collect(state: &HubState, since: u64) -> PollResponse {
    let oldest = state.recent.front().map(|s| s.seq).unwrap_or(state.latest + 1);

    // Client is from a previous server run, or missed signals we no longer hold
    let stale = since > state.latest || (since + 1 < oldest && since < state.latest);
    let signals = if stale {
        vec![Signal {
            seq: state.latest,
            kind: ReloadKind::FullPage,
        }]
    } else {
        state
            .recent
            .iter()
            .filter(|s| s.seq > since)
            .cloned()
            .collect()
    };

    PollResponse {
        seq: state.latest,
        signals,
    }
}

impl ReloadNotifier for ReloadHub {
    fn notify(&self, kind: ReloadKind) {
        let mut state = self.lock();
        state.latest += 1;
        let seq = state.latest;
        state.recent.push_back(Signal { seq, kind });
        while state.recent.len() > HISTORY {
            state.recent.pop_front();
        }
        drop(state);
        self.changed.notify_all();
    }
}
