//! Domain Value Objects
//!
//! Immutable value types that represent build concepts.

mod config_warning;
mod environment;
mod task_kind;

pub use config_warning::ConfigWarning;
pub use environment::{BuildEnv, ENV_VAR};
pub use task_kind::TaskKind;
