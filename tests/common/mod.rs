//! Common test utilities for assetline integration tests.
//!
//! This module provides:
//! - `TestProject`: Isolated project directory plus CLI helpers
//! - Assertion macros: `assert_exists!`, `assert_missing!`
//! - Fixtures: Sample site content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
