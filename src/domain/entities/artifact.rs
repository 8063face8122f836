//! Build artifacts
//!
//! An artifact is the in-memory result of a transform: a path relative to the
//! output root plus the bytes to write there. Artifacts carry no identity
//! beyond that path and are overwritten on every rebuild.

use std::path::{Path, PathBuf};

/// A single output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    contents: Vec<u8>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Path relative to the output root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Lossy text view (tests and diagnostics)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }

    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    /// Source maps are reported but never trigger reloads on their own
    pub fn is_source_map(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "map")
    }
}

/// Ordered artifacts produced by one task run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.artifacts.iter().map(Artifact::size).sum()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        let path = path.as_ref();
        self.artifacts.iter().find(|a| a.path() == path)
    }

    /// Paths a browser may need to refresh (source maps excluded)
    pub fn reload_paths(&self) -> Vec<PathBuf> {
        self.artifacts
            .iter()
            .filter(|a| !a.is_source_map())
            .map(|a| a.path().to_path_buf())
            .collect()
    }
}

impl FromIterator<Artifact> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        Self {
            artifacts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ArtifactSet {
    type Item = Artifact;
    type IntoIter = std::vec::IntoIter<Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}
