//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod clock;
pub mod reload_notifier;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use clock::{Clock, FixedClock, SystemClock};
pub use reload_notifier::{NoopNotifier, ReloadKind, ReloadNotifier};
