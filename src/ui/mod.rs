//! Console presentation for the CLI

pub mod blocks;
pub mod context;
pub mod logger;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
