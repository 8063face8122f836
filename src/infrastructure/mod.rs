//! Infrastructure Layer
//!
//! Concrete adapters: local file system writes and the live-reload dev
//! server.

pub mod fs;
pub mod server;

pub use fs::LocalFs;
pub use server::{DevServer, ReloadHub};
