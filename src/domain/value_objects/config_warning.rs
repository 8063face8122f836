//! Unknown configuration key

use std::fmt;
use std::path::PathBuf;

/// A key in `assetline.toml` that no section recognises. Loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the dotted key path
    pub key: String,
    /// Enclosing table, `None` at top level
    pub section: Option<String>,
    pub file: PathBuf,
    /// 1-indexed
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    /// Split a `serde_ignored` path such as `paths.scirpts`.
    pub fn from_path(path: &str, file: PathBuf) -> Self {
        let (section, key) = match path.rsplit_once('.') {
            Some((section, key)) => (Some(section.to_string()), key.to_string()),
            None => (None, path.to_string()),
        };
        Self {
            key,
            section,
            file,
            line: None,
            suggestion: None,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown config key '{}'", self.key)?;
        if let Some(section) = &self.section {
            write!(f, " in [{section}]")?;
        }
        write!(f, " ({}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        f.write_str(")")
    }
}
