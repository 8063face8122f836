//! assetline - static front-end asset pipeline
//!
//! Compiles HTML pages with `@@include(...)` directives, expands utility
//! classes into a vendor-prefixed stylesheet, bundles JavaScript, copies
//! images and serves the result with live reload.
//!
//! ## Layers
//!
//! - `domain` - Build vocabulary: environments, step plans, artifacts, ports
//! - `transform` - The four leaf tasks (html, css, js, assets)
//! - `application` - Task runner, pipelines and the watch loop
//! - `infrastructure` - Filesystem writes and the live-reload dev server
//! - `config` - `assetline.toml` loading and environment overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod transform;

pub use application::{BuildContext, PassReport, Pipeline, TaskOutcome, TaskRunner};
pub use config::Config;
pub use domain::value_objects::{BuildEnv, TaskKind};
pub use error::{BuildError, BuildResult, ErrorKind};
