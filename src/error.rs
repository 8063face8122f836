//! Error types for assetline
//!
//! Library code returns [`BuildResult`]; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for assetline operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Coarse classification used by the logger and the CLI exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source unreadable, output unwritable, or deletion failed
    Io,
    /// A transform step rejected its input
    Transform,
    /// Malformed or missing configuration
    Configuration,
    /// Watcher or dev-server start-up failure
    Runtime,
}

/// Main error type for build operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Source file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be removed
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transform rejected malformed input
    #[error("{file}: {message}")]
    Transform { file: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Invalid glob pattern in configuration
    #[error("invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Filesystem watcher failure
    #[error("watcher error: {0}")]
    Watch(String),

    /// Dev server failure
    #[error("dev server error: {0}")]
    Server(String),

    /// A task panicked instead of returning an error
    #[error("task panicked: {detail}")]
    Panicked { detail: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    pub fn transform(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BuildError::Transform {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Read { .. }
            | BuildError::Write { .. }
            | BuildError::Remove { .. }
            | BuildError::Io(_) => ErrorKind::Io,
            BuildError::Transform { .. } | BuildError::Panicked { .. } => ErrorKind::Transform,
            BuildError::Config { .. } | BuildError::Pattern { .. } => ErrorKind::Configuration,
            BuildError::Watch(_) | BuildError::Server(_) => ErrorKind::Runtime,
        }
    }
}

impl From<notify::Error> for BuildError {
    fn from(e: notify::Error) -> Self {
        BuildError::Watch(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_transform() {
        let err = BuildError::transform("src/pages/index.html", "include depth exceeded");
        assert_eq!(
            err.to_string(),
            "src/pages/index.html: include depth exceeded"
        );
        assert_eq!(err.kind(), ErrorKind::Transform);
    }

    #[test]
    fn test_error_display_read() {
        let err = BuildError::Read {
            path: PathBuf::from("src/assets/css/style.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read src/assets/css/style.css: not found"
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_config_errors_are_configuration_kind() {
        let err = BuildError::Pattern {
            pattern: "src/[".to_string(),
            message: "unclosed".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
