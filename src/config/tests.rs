//! Tests for the config module

use super::loader::{load_for_project, load_with_warnings, with_env_overrides_from};
use super::types::*;
use crate::error::BuildError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_default_mirrors_conventional_layout() {
    let config = Config::default();

    assert_eq!(config.paths.pages, "src/pages/**/*.html");
    assert_eq!(config.paths.style_entry, "src/assets/css/style.css");
    assert_eq!(config.paths.scripts, "src/assets/js/**/*.js");
    assert_eq!(config.paths.images, "src/assets/images/**/*");
    assert_eq!(config.paths.out, "dist");
    assert_eq!(config.html.include_prefix, "@@");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.utility.content, vec!["src/**/*.html".to_string()]);
    assert!(config.utility.container.center);
}

#[test]
fn test_config_parse_toml_partial_sections() {
    let toml = r#"
[paths]
out = "public"

[server]
port = 8080

[utility.container]
center = false
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.paths.out, "public");
    assert_eq!(config.paths.pages, "src/pages/**/*.html");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "localhost");
    assert!(!config.utility.container.center);
    assert_eq!(config.utility.container.padding.as_deref(), Some("1rem"));
}

#[test]
fn test_unknown_keys_become_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assetline.toml");
    fs::write(&path, "[server]\nprot = 4000\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "prot");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("port"));
}

#[test]
fn test_malformed_toml_is_configuration_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assetline.toml");
    fs::write(&path, "[server\nport = 1").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, BuildError::Config { .. }));
}

#[test]
fn test_invalid_glob_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assetline.toml");
    fs::write(&path, "[paths]\npages = \"src/[pages/*.html\"\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, BuildError::Pattern { .. }));
}

#[test]
fn test_invalid_browser_version_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assetline.toml");
    fs::write(&path, "[style.targets]\nsafari = \"latest\"\n").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(err.to_string().contains("style.targets.safari"));
}

#[test]
fn test_missing_default_file_uses_defaults() {
    let dir = tempdir().unwrap();

    let loaded = load_for_project(dir.path(), None).unwrap();

    assert!(!loaded.from_file);
    assert_eq!(loaded.path, dir.path().join("assetline.toml"));
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempdir().unwrap();

    let err = load_for_project(dir.path(), Some(std::path::Path::new("custom.toml"))).unwrap_err();
    assert!(matches!(err, BuildError::Config { .. }));
}

#[test]
fn test_env_overrides_port_and_out() {
    let config = with_env_overrides_from(Config::default(), |key| match key {
        "ASSETLINE_PORT" => Some("4321".to_string()),
        "ASSETLINE_OUT" => Some("build".to_string()),
        _ => None,
    });

    assert_eq!(config.server.port, 4321);
    assert_eq!(config.paths.out, "build");
}

#[test]
fn test_env_override_ignores_bad_port() {
    let config = with_env_overrides_from(Config::default(), |key| {
        (key == "ASSETLINE_PORT").then(|| "not-a-port".to_string())
    });

    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_parse_browser_version() {
    assert_eq!(parse_browser_version("80"), Some(80 << 16));
    assert_eq!(parse_browser_version("13.1"), Some((13 << 16) | (1 << 8)));
    assert_eq!(parse_browser_version("13.1.2"), Some((13 << 16) | (1 << 8) | 2));
    assert_eq!(parse_browser_version("latest"), None);
    assert_eq!(parse_browser_version("1.2.3.4"), None);
}

#[test]
fn test_server_url() {
    assert_eq!(ServerConfig::default().url(), "http://localhost:3000");
}
