//! Source discovery helpers shared by the transform tasks

use std::path::{Component, Path, PathBuf};

use crate::error::{BuildError, BuildResult};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Literal directory prefix of a glob pattern (`src/pages/**/*.html` -> `src/pages`).
pub fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    let components: Vec<&str> = pattern.split('/').collect();
    for (i, part) in components.iter().enumerate() {
        let is_last = i + 1 == components.len();
        if part.contains(GLOB_META) || is_last {
            break;
        }
        base.push(part);
    }
    base
}

/// Files matching `pattern` (relative to `root`), in lexicographic path order.
pub fn list_files(root: &Path, pattern: &str) -> BuildResult<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        pattern.trim_start_matches("./")
    );

    let paths = glob::glob(&full).map_err(|e| BuildError::Pattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| BuildError::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Does `relative` (a path relative to the project root) match `pattern`?
pub fn matches(pattern: &glob::Pattern, relative: &Path) -> bool {
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    pattern.matches_path_with(relative, options)
}

/// `path` relative to `base`, refusing anything that would escape it.
pub fn relative_to(path: &Path, base: &Path) -> BuildResult<PathBuf> {
    let rel = path
        .strip_prefix(base)
        .map_err(|_| BuildError::transform(path, format!("not below {}", base.display())))?;
    if rel.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(BuildError::transform(path, "path escapes its source directory"));
    }
    Ok(rel.to_path_buf())
}

pub fn read_bytes(path: &Path) -> BuildResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_text(path: &Path) -> BuildResult<String> {
    std::fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}
