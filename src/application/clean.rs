//! Output directory cleaning

use std::path::{Path, PathBuf};

use crate::error::BuildResult;
use crate::infrastructure::LocalFs;

/// The build output root
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
    fs: LocalFs,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the output root recursively. An absent root is success.
    pub fn clean(&self) -> BuildResult<()> {
        self.fs.remove_tree(&self.path)
    }
}
