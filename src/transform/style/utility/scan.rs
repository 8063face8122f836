//! Candidate class discovery in content files

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::BuildResult;
use crate::transform::files::{list_files, read_text};

fn is_class_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/' | '.' | '%')
}

/// Collect every token that could be a class name.
///
/// Over-collection is harmless: tokens that resolve to no utility are
/// dropped at generation time.
pub fn extract_candidates(text: &str, out: &mut BTreeSet<String>) {
    for token in text.split(|c: char| !is_class_char(c)) {
        let token = token.trim_matches(|c: char| c == '.' || c == ':' || c == '/');
        if token.is_empty() || token.len() > 64 {
            continue;
        }
        if !token.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '-') {
            continue;
        }
        out.insert(token.to_string());
    }
}

/// Scan all files matching `patterns` below `root`.
pub fn scan_candidates(root: &Path, patterns: &[String]) -> BuildResult<BTreeSet<String>> {
    let mut candidates = BTreeSet::new();
    for pattern in patterns {
        for file in list_files(root, pattern)? {
            extract_candidates(&read_text(&file)?, &mut candidates);
        }
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn extract(text: &str) -> Vec<String> {
        let mut set = BTreeSet::new();
        extract_candidates(text, &mut set);
        set.into_iter().collect()
    }

    #[test]
    fn splits_class_attributes() {
        let found = extract(r#"<div class="flex md:p-4 hover:bg-blue-500 w-1/2">x</div>"#);
        for class in ["flex", "md:p-4", "hover:bg-blue-500", "w-1/2"] {
            assert!(found.contains(&class.to_string()), "{class} missing from {found:?}");
        }
    }

    #[test]
    fn keeps_negative_and_fractional_tokens() {
        let found = extract("class='-mt-2 py-0.5'");
        assert!(found.contains(&"-mt-2".to_string()));
        assert!(found.contains(&"py-0.5".to_string()));
    }

    #[test]
    fn trims_sentence_punctuation() {
        let found = extract("Use flex.");
        assert!(found.contains(&"flex".to_string()));
        assert!(!found.contains(&"flex.".to_string()));
    }

    #[test]
    fn scans_matching_files_only() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/pages")).unwrap();
        fs::write(dir.path().join("src/pages/a.html"), "<p class=\"italic\">").unwrap();
        fs::write(dir.path().join("src/notes.txt"), "uppercase").unwrap();

        let found = scan_candidates(dir.path(), &["src/**/*.html".to_string()]).unwrap();

        assert!(found.contains("italic"));
        assert!(!found.contains("uppercase"));
    }
}
