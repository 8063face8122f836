//! HTML task: include expansion, then (Production) whitespace collapsing

mod include;

pub use include::{Context, IncludeExpander, MAX_INCLUDE_DEPTH};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::domain::entities::{Artifact, ArtifactSet};
use crate::domain::policies::{Step, StepPlan};
use crate::domain::ports::Clock;
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::BuildResult;
use crate::transform::files::{glob_base, list_files, read_text, relative_to};
use crate::transform::Task;

pub struct HtmlTask {
    root: PathBuf,
    pages: String,
    expander: IncludeExpander,
    clock: Arc<dyn Clock>,
    plan: StepPlan,
}

impl HtmlTask {
    pub fn new(root: &Path, config: &Config, env: BuildEnv, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.to_path_buf(),
            pages: config.paths.pages.clone(),
            expander: IncludeExpander::new(config.html.include_prefix.clone()),
            clock,
            plan: StepPlan::for_task(TaskKind::Html, env),
        }
    }

    /// Root template context: `year` plus nothing else.
    pub fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("year".to_string(), Value::from(self.clock.year()));
        context
    }

    fn render_page(&self, page: &Path, context: &Context) -> BuildResult<String> {
        let mut html = read_text(page)?;
        for step in self.plan.transform_steps() {
            html = match step {
                Step::ExpandIncludes => self.expander.expand(&html, page, context)?,
                Step::CollapseHtml => collapse(&html),
                _ => html,
            };
        }
        Ok(html)
    }
}

impl Task for HtmlTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Html
    }

    fn plan(&self) -> &StepPlan {
        &self.plan
    }

    fn run(&self) -> BuildResult<ArtifactSet> {
        let base = self.root.join(glob_base(&self.pages));
        let context = self.base_context();

        let mut artifacts = ArtifactSet::new();
        for page in list_files(&self.root, &self.pages)? {
            let html = self.render_page(&page, &context)?;
            artifacts.push(Artifact::new(relative_to(&page, &base)?, html));
        }
        Ok(artifacts)
    }
}

/// Collapse whitespace and drop comments.
fn collapse(html: &str) -> String {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_comments = false;
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.minify_css = false;
    cfg.minify_js = false;
    String::from_utf8_lossy(&minify_html::minify(html.as_bytes(), &cfg)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;
    use std::fs;
    use tempfile::tempdir;

    fn setup(dir: &Path) {
        let pages = dir.join("src/pages");
        fs::create_dir_all(pages.join("blog")).unwrap();
        fs::write(
            pages.join("index.html"),
            "<html>\n  <body>\n    <!-- nav -->\n    @@include('partial.html')\n  </body>\n</html>\n",
        )
        .unwrap();
        fs::write(pages.join("partial.html"), "<footer>&copy; @@year Demo</footer>").unwrap();
        fs::write(pages.join("blog/post.html"), "<p>post</p>").unwrap();
    }

    fn task(dir: &Path, env: BuildEnv) -> HtmlTask {
        HtmlTask::new(dir, &Config::default(), env, Arc::new(FixedClock::at_year(2029)))
    }

    #[test]
    fn year_comes_from_clock() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let artifacts = task(dir.path(), BuildEnv::Development).run().unwrap();
        let index = artifacts.get("index.html").unwrap().text();

        assert!(index.contains("<footer>&copy; 2029 Demo</footer>"), "{index}");
    }

    #[test]
    fn output_mirrors_page_tree() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let artifacts = task(dir.path(), BuildEnv::Development).run().unwrap();
        let mut paths: Vec<_> = artifacts.iter().map(|a| a.path().to_path_buf()).collect();
        paths.sort();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("blog/post.html"),
                PathBuf::from("index.html"),
                PathBuf::from("partial.html"),
            ]
        );
    }

    #[test]
    fn development_keeps_whitespace_and_comments() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let artifacts = task(dir.path(), BuildEnv::Development).run().unwrap();
        let index = artifacts.get("index.html").unwrap().text();

        assert!(index.contains("<!-- nav -->"));
        assert!(index.contains("\n  <body>"));
    }

    #[test]
    fn production_collapses_whitespace_and_strips_comments() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let artifacts = task(dir.path(), BuildEnv::Production).run().unwrap();
        let index = artifacts.get("index.html").unwrap().text();

        assert!(!index.contains("<!--"), "{index}");
        assert!(!index.contains("\n  "), "{index}");
        assert!(index.contains("2029 Demo"), "{index}");
    }

    #[test]
    fn missing_pages_yield_empty_set() {
        let dir = tempdir().unwrap();
        let artifacts = task(dir.path(), BuildEnv::Production).run().unwrap();
        assert!(artifacts.is_empty());
    }
}
