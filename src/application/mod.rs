//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, policies, ports)
//! - Drives the transform tasks and the infrastructure adapters
//!
//! ## Use Cases
//!
//! - `TaskRunner` - Runs one task: write, report sizes, signal reload
//! - `OutputDir` - Cleans the output root
//! - `Pipeline` - Production and development passes
//! - `WatchUseCase` - Rebuilds on file changes

pub mod clean;
pub mod pipeline;
pub mod runner;
pub mod watch;

pub use clean::OutputDir;
pub use pipeline::{BuildContext, PassReport, Pipeline};
pub use runner::{TaskOutcome, TaskRunner};
pub use watch::{WatchAction, WatchSubscription, WatchUseCase, DEBOUNCE_MS};
