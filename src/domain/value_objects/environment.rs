//! Build environment value object
//!
//! Resolved once at process entry and passed by value into every task.

/// Environment variable selecting the build environment
pub const ENV_VAR: &str = "ASSETLINE_ENV";

/// Build environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildEnv {
    /// Source maps, loose minification, live reload
    #[default]
    Development,
    /// Clean output, compaction, aggressive minification
    Production,
}

impl BuildEnv {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using an injected lookup (test seam).
    pub fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Self {
        match get_env(ENV_VAR) {
            Some(value) => Self::parse(&value),
            None => BuildEnv::Development,
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => BuildEnv::Production,
            _ => BuildEnv::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildEnv::Production)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildEnv::Development => "Development",
            BuildEnv::Production => "Production",
        }
    }
}

impl std::fmt::Display for BuildEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
