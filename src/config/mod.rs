//! Configuration module for assetline
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSETLINE_*)
//! 3. Project config (`assetline.toml`)
//! 4. Built-in defaults (lowest priority)
//!
//! The build environment itself (`ASSETLINE_ENV`) is not configuration; see
//! [`crate::domain::value_objects::BuildEnv`].

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{load_for_project, with_env_overrides, LoadedConfig, CONFIG_FILE};
pub use types::{
    parse_browser_version, BrowserTargets, ColorMode, Config, ContainerConfig, HtmlConfig,
    OutputConfig, PathsConfig, ServerConfig, StyleConfig, UtilityConfig,
};
