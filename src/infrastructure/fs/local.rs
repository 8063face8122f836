//! Local File System Implementation
//!
//! Atomic writes and tree removal for the output directory.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BuildError, BuildResult};

/// Local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Write `contents` to `path` via a temp file in the same directory, so
    /// readers (the dev server) never see a half-written file.
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> BuildResult<()> {
        let write_err = |source: std::io::Error| BuildError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(contents).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Remove a directory tree; a missing directory is not an error.
    pub fn remove_tree(&self, path: &Path) -> BuildResult<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BuildError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
