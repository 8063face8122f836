//! Assertion macros with descriptive failure messages.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Assert that a file exists relative to the project root.
#[macro_export]
macro_rules! assert_exists {
    ($project:expr, $path:expr) => {
        let full_path = $project.path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files($project.root()).join("\n  ")
        );
    };
}

/// Assert that a path does NOT exist relative to the project root.
#[macro_export]
macro_rules! assert_missing {
    ($project:expr, $path:expr) => {
        let full_path = $project.path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT exist, but it does.",
            $path
        );
    };
}
