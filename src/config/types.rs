//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{BuildError, BuildResult};

use super::loader;

/// Source and output locations, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of all sources (HTML watch scope)
    pub src: String,
    /// Page templates; output mirrors the tree below the literal base
    pub pages: String,
    /// Single stylesheet entry point
    pub style_entry: String,
    /// Scripts concatenated into the bundle
    pub scripts: String,
    /// Images copied verbatim
    pub images: String,
    /// Output root
    pub out: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            src: "src".to_string(),
            pages: "src/pages/**/*.html".to_string(),
            style_entry: "src/assets/css/style.css".to_string(),
            scripts: "src/assets/js/**/*.js".to_string(),
            images: "src/assets/images/**/*".to_string(),
            out: "dist".to_string(),
        }
    }
}

/// HTML include configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub include_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            include_prefix: "@@".to_string(),
        }
    }
}

/// Dev server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// `container` component options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub center: bool,
    pub padding: Option<String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            center: true,
            padding: Some("1rem".to_string()),
        }
    }
}

/// Utility-class framework configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityConfig {
    /// Files scanned for class usage
    pub content: Vec<String>,
    pub container: ContainerConfig,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            content: vec!["src/**/*.html".to_string()],
            container: ContainerConfig::default(),
        }
    }
}

/// Browser versions used for vendor prefixing ("major" or "major.minor")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserTargets {
    pub android: Option<String>,
    pub chrome: Option<String>,
    pub edge: Option<String>,
    pub firefox: Option<String>,
    pub ie: Option<String>,
    pub ios_saf: Option<String>,
    pub opera: Option<String>,
    pub safari: Option<String>,
    pub samsung: Option<String>,
}

impl Default for BrowserTargets {
    fn default() -> Self {
        Self {
            android: None,
            chrome: Some("80".to_string()),
            edge: Some("88".to_string()),
            firefox: Some("78".to_string()),
            ie: None,
            ios_saf: Some("13".to_string()),
            opera: None,
            safari: Some("13".to_string()),
            samsung: None,
        }
    }
}

impl BrowserTargets {
    /// Named entries, in a stable order
    pub fn entries(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("android", self.android.as_deref()),
            ("chrome", self.chrome.as_deref()),
            ("edge", self.edge.as_deref()),
            ("firefox", self.firefox.as_deref()),
            ("ie", self.ie.as_deref()),
            ("ios_saf", self.ios_saf.as_deref()),
            ("opera", self.opera.as_deref()),
            ("safari", self.safari.as_deref()),
            ("samsung", self.samsung.as_deref()),
        ]
    }
}

/// Parse "80", "13.1" or "13.1.2" into the `major << 16 | minor << 8 | patch`
/// encoding used by CSS target tables.
pub fn parse_browser_version(value: &str) -> Option<u32> {
    let mut parts = value.trim().split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next().map(str::parse::<u32>).transpose().ok()?.unwrap_or(0);
    let patch: u32 = parts.next().map(str::parse::<u32>).transpose().ok()?.unwrap_or(0);
    if parts.next().is_some() || minor > 255 || patch > 255 {
        return None;
    }
    Some((major << 16) | (minor << 8) | patch)
}

/// Stylesheet pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleConfig {
    pub targets: BrowserTargets,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub html: HtmlConfig,
    pub server: ServerConfig,
    pub utility: UtilityConfig,
    pub style: StyleConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file, discarding warnings
    pub fn load(path: &Path) -> BuildResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Check values serde cannot: glob syntax, browser versions, prefix.
    pub fn validate(&self, file: &Path) -> BuildResult<()> {
        let invalid = |message: String| BuildError::Config {
            file: file.to_path_buf(),
            message,
        };

        if self.html.include_prefix.trim().is_empty() {
            return Err(invalid("html.include_prefix must not be empty".to_string()));
        }

        let globs = [
            &self.paths.pages,
            &self.paths.scripts,
            &self.paths.images,
        ]
        .into_iter()
        .chain(self.utility.content.iter());
        for pattern in globs {
            glob::Pattern::new(pattern).map_err(|e| BuildError::Pattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?;
        }

        for (name, version) in self.style.targets.entries() {
            if let Some(v) = version {
                if parse_browser_version(v).is_none() {
                    return Err(invalid(format!(
                        "style.targets.{name}: '{v}' is not a browser version"
                    )));
                }
            }
        }

        if self.paths.out.trim().is_empty() || self.paths.out.trim() == "." {
            return Err(invalid(
                "paths.out must name a directory below the project root".to_string(),
            ));
        }

        Ok(())
    }
}
