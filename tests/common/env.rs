//! Isolated project builder for integration tests.
//!
//! Provides `TestProject` - a temp directory laid out like an assetline
//! project, plus helpers to run the CLI and build a library context.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use assetline::config::Config;
use assetline::{BuildContext, BuildEnv};

use super::fixtures::*;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn builder() -> TestProjectBuilder {
        TestProjectBuilder::default()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Library context with default configuration and silent ports
    pub fn context(&self, env: BuildEnv) -> BuildContext {
        BuildContext::new(
            self.root(),
            Config::default(),
            self.path("assetline.toml"),
            env,
        )
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_assetline"));
        cmd.current_dir(self.root())
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("ASSETLINE_ENV")
            .env_remove("ASSETLINE_PORT")
            .env_remove("ASSETLINE_OUT");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute assetline");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[derive(Default)]
pub struct TestProjectBuilder {
    files: Vec<(String, String)>,
}

impl TestProjectBuilder {
    /// The fixture site: one page with a partial, a stylesheet, two scripts
    /// and an image.
    pub fn with_sample_site(self) -> Self {
        self.with_file("src/pages/index.html", INDEX_HTML)
            .with_file("src/partials/header.html", HEADER_PARTIAL)
            .with_file("src/assets/css/style.css", STYLE_CSS)
            .with_file("src/assets/js/a.js", A_JS)
            .with_file("src/assets/js/b.js", B_JS)
            .with_file("src/assets/images/logo.svg", LOGO_SVG)
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((path.to_string(), contents.to_string()));
        self
    }

    pub fn build(self) -> TestProject {
        let project = TestProject {
            dir: TempDir::new().unwrap(),
        };
        for (path, contents) in &self.files {
            project.write(path, contents);
        }
        project
    }
}
