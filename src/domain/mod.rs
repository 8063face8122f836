//! Domain Layer
//!
//! Build vocabulary without I/O: environments, task kinds, step plans,
//! artifacts, and the ports the pipeline talks through.
//!
//! ## Structure
//!
//! - `entities/` - Build artifacts produced by tasks
//! - `value_objects/` - Immutable value types (BuildEnv, TaskKind)
//! - `policies/` - Per-environment step plans
//! - `ports/` - Interface definitions for infrastructure (events, reload, clock)

pub mod entities;
pub mod policies;
pub mod ports;
pub mod value_objects;
