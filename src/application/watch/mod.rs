//! Watch Use Case
//!
//! Continuous rebuilds while files change:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms quiet period, changes coalesced per path)
//! - Subscription matching (`WatchSubscription` -> `WatchAction`)
//! - Rebuilding through the task runner, plus full-page reloads for HTML
//!   and configuration reloads for the stylesheet

mod event;
mod subscription;
mod use_case;


pub use event::{WatcherState, DEBOUNCE_MS};
pub use subscription::{actions_for, subscriptions, WatchAction, WatchSubscription};
pub use use_case::{relative_change, WatchUseCase};
