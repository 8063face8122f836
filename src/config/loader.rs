//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{BuildError, BuildResult};

use super::types::Config;

/// Default configuration file name, looked up in the project root
pub const CONFIG_FILE: &str = "assetline.toml";

/// A loaded configuration plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File consulted (may not exist when defaults were used)
    pub path: PathBuf,
    /// Whether `path` existed and was read
    pub from_file: bool,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BuildError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate(path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let mut warning = ConfigWarning::from_path(&path_str, path.to_path_buf());
            warning.line = find_line_number(&content, &warning.key);
            warning.suggestion = suggest_key(&warning.key);
            warning
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the configuration for a project.
///
/// An explicit path must exist. Without one, `<root>/assetline.toml` is used
/// when present and built-in defaults otherwise. Environment overrides are
/// applied last.
pub fn load_for_project(root: &Path, explicit: Option<&Path>) -> BuildResult<LoadedConfig> {
    let path = match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => root.join(p),
        None => root.join(CONFIG_FILE),
    };

    if explicit.is_some() && !path.exists() {
        return Err(BuildError::Config {
            file: path,
            message: "configuration file not found".to_string(),
        });
    }

    let (config, warnings, from_file) = if path.exists() {
        let (config, warnings) = load_with_warnings(&path)?;
        (config, warnings, true)
    } else {
        (Config::default(), Vec::new(), false)
    };

    let config = with_env_overrides(config);
    config.validate(&path)?;

    Ok(LoadedConfig {
        config,
        path,
        from_file,
        warnings,
    })
}

/// Apply environment variable overrides (ASSETLINE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // ASSETLINE_PORT
    if let Some(port) = get_env("ASSETLINE_PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
        config.server.port = port;
    }

    // ASSETLINE_OUT
    if let Some(out) = get_env("ASSETLINE_OUT") {
        if !out.trim().is_empty() {
            config.paths.out = out.trim().to_string();
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "src",
        "pages",
        "style_entry",
        "scripts",
        "images",
        "out",
        "html",
        "include_prefix",
        "server",
        "host",
        "port",
        "utility",
        "content",
        "container",
        "center",
        "padding",
        "style",
        "targets",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
