//! File system adapters

mod local;

pub use local::LocalFs;
