//! Style task: utility expansion, vendor prefixing, compaction

pub mod utility;

use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;

use crate::config::{parse_browser_version, BrowserTargets, Config};
use crate::domain::entities::{Artifact, ArtifactSet};
use crate::domain::policies::{Step, StepPlan};
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::{BuildError, BuildResult};
use crate::transform::files::read_text;
use crate::transform::Task;

use utility::{scan_candidates, UtilityEngine};

/// Output directory for stylesheets, relative to the output root
pub const CSS_DIR: &str = "css";

pub struct StyleTask {
    root: PathBuf,
    entry: String,
    content: Vec<String>,
    engine: UtilityEngine,
    targets: Targets,
    plan: StepPlan,
}

impl StyleTask {
    pub fn new(root: &Path, config: &Config, env: BuildEnv) -> Self {
        Self {
            root: root.to_path_buf(),
            entry: config.paths.style_entry.clone(),
            content: config.utility.content.clone(),
            engine: UtilityEngine::new(&config.utility),
            targets: Targets::from(browsers(&config.style.targets)),
            plan: StepPlan::for_task(TaskKind::Css, env),
        }
    }
}

impl Task for StyleTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Css
    }

    fn plan(&self) -> &StepPlan {
        &self.plan
    }

    fn run(&self) -> BuildResult<ArtifactSet> {
        let entry = self.root.join(&self.entry);
        let file_name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "style.css".to_string());

        let mut css = read_text(&entry)?;
        let mut output_name = file_name.clone();
        let mut with_map = false;
        let mut map = None;

        for step in self.plan.transform_steps() {
            match step {
                Step::SourceMapInit => with_map = true,
                Step::ExpandUtilities => {
                    let candidates = scan_candidates(&self.root, &self.content)?;
                    css = self.engine.expand(&css, &candidates, &entry)?;
                }
                Step::VendorPrefix => {
                    let (code, source_map) =
                        process_css(&css, &file_name, &entry, self.targets, false, with_map)?;
                    css = code;
                    map = source_map;
                }
                Step::Compact => {
                    css = process_css(&css, &file_name, &entry, self.targets, true, false)?.0;
                }
                Step::RenameMin => output_name = min_name(&output_name),
                Step::SourceMapWrite => {
                    let Some(json) = map.take() else { continue };
                    css.push_str(&format!("\n/*# sourceMappingURL={output_name}.map */\n"));
                    let mut artifacts = ArtifactSet::new();
                    let dir = Path::new(CSS_DIR);
                    artifacts.push(Artifact::new(dir.join(&output_name), css));
                    artifacts.push(Artifact::new(dir.join(format!("{output_name}.map")), json));
                    return Ok(artifacts);
                }
                _ => {}
            }
        }

        Ok(std::iter::once(Artifact::new(Path::new(CSS_DIR).join(output_name), css)).collect())
    }
}

/// lightningcss browser table from configured versions
pub fn browsers(targets: &BrowserTargets) -> Browsers {
    let mut browsers = Browsers::default();
    for (name, version) in targets.entries() {
        let version = version.and_then(parse_browser_version);
        match name {
            "android" => browsers.android = version,
            "chrome" => browsers.chrome = version,
            "edge" => browsers.edge = version,
            "firefox" => browsers.firefox = version,
            "ie" => browsers.ie = version,
            "ios_saf" => browsers.ios_saf = version,
            "opera" => browsers.opera = version,
            "safari" => browsers.safari = version,
            "samsung" => browsers.samsung = version,
            _ => {}
        }
    }
    browsers
}

/// `style.css` -> `style.min.css`
pub fn min_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.min.{ext}"),
        _ => format!("{name}.min"),
    }
}

/// Parse, prefix for `targets` and print. Returns the CSS and, when asked,
/// the JSON source map.
fn process_css(
    css: &str,
    filename: &str,
    file: &Path,
    targets: Targets,
    minify: bool,
    with_map: bool,
) -> BuildResult<(String, Option<String>)> {
    let failed = |message: String| BuildError::transform(file, message);

    let mut stylesheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: filename.to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| failed(e.to_string()))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| failed(e.to_string()))?;

    let mut source_map = if with_map {
        let mut sm = SourceMap::new("/");
        let source = sm.add_source(filename);
        sm.set_source_content(source as usize, css)
            .map_err(|e| failed(format!("source map: {e:?}")))?;
        Some(sm)
    } else {
        None
    };

    let printed = stylesheet
        .to_css(PrinterOptions {
            minify,
            targets,
            source_map: source_map.as_mut(),
            ..PrinterOptions::default()
        })
        .map_err(|e| failed(e.to_string()))?;

    let json = match source_map.as_mut() {
        Some(sm) => Some(
            sm.to_json(None)
                .map_err(|e| failed(format!("source map: {e:?}")))?,
        ),
        None => None,
    };

    Ok((printed.code, json))
}
