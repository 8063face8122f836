//! Script task: concatenation and minification

mod loose;

pub use loose::{minify_loose, LooseOutput};

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use parcel_sourcemap::{OriginalLocation, SourceMap};

use crate::config::Config;
use crate::domain::entities::{Artifact, ArtifactSet};
use crate::domain::policies::{Step, StepPlan};
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::{BuildError, BuildResult};
use crate::transform::files::{list_files, read_text};
use crate::transform::Task;

/// Bundle path relative to the output root
pub const BUNDLE_PATH: &str = "js/bundle.min.js";

/// One script contributing to the bundle
#[derive(Debug, Clone)]
struct Source {
    /// Path relative to the project root, `/`-separated
    name: String,
    text: String,
    /// First bundle line this source occupies
    first_line: usize,
}

/// Scripts joined with `\n`, remembering where each one starts
#[derive(Debug, Default)]
struct Bundle {
    sources: Vec<Source>,
    code: String,
}

impl Bundle {
    fn push(&mut self, name: String, text: String) {
        let first_line = match self.sources.last() {
            Some(last) => last.first_line + last.text.split('\n').count(),
            None => 0,
        };
        if !self.sources.is_empty() {
            self.code.push('\n');
        }
        self.code.push_str(&text);
        self.sources.push(Source {
            name,
            text,
            first_line,
        });
    }

    /// (source index, line within that source) for a bundle line
    fn locate(&self, line: usize) -> Option<(usize, usize)> {
        let idx = self.sources.partition_point(|s| s.first_line <= line);
        let idx = idx.checked_sub(1)?;
        Some((idx, line - self.sources[idx].first_line))
    }
}

pub struct ScriptTask {
    root: PathBuf,
    scripts: String,
    plan: StepPlan,
}

impl ScriptTask {
    pub fn new(root: &Path, config: &Config, env: BuildEnv) -> Self {
        Self {
            root: root.to_path_buf(),
            scripts: config.paths.scripts.clone(),
            plan: StepPlan::for_task(TaskKind::Javascript, env),
        }
    }

    fn concat(&self) -> BuildResult<Bundle> {
        let mut bundle = Bundle::default();
        for file in list_files(&self.root, &self.scripts)? {
            let name = file
                .strip_prefix(&self.root)
                .unwrap_or(&file)
                .to_string_lossy()
                .replace('\\', "/");
            bundle.push(name, read_text(&file)?);
        }
        Ok(bundle)
    }
}

impl Task for ScriptTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Javascript
    }

    fn plan(&self) -> &StepPlan {
        &self.plan
    }

    fn run(&self) -> BuildResult<ArtifactSet> {
        let mut bundle = Bundle::default();
        let mut code = String::new();
        let mut origins: Option<Vec<usize>> = None;
        let mut with_map = false;
        let mut map_json = None;

        for step in self.plan.transform_steps() {
            match step {
                Step::SourceMapInit => with_map = true,
                Step::Concat => {
                    bundle = self.concat()?;
                    if bundle.sources.is_empty() {
                        return Ok(ArtifactSet::new());
                    }
                    code = bundle.code.clone();
                }
                Step::MinifyLoose => {
                    let out = minify_loose(&code);
                    code = out.code;
                    origins = Some(out.origins);
                }
                Step::MinifyAggressive => code = minify_aggressive(&code)?,
                Step::SourceMapWrite if with_map => {
                    let lines = origins
                        .take()
                        .unwrap_or_else(|| (0..code.split('\n').count()).collect());
                    map_json = Some(line_map(&bundle, &lines)?);
                    code.push_str("\n//# sourceMappingURL=bundle.min.js.map\n");
                }
                _ => {}
            }
        }

        let mut artifacts = ArtifactSet::new();
        artifacts.push(Artifact::new(BUNDLE_PATH, code));
        if let Some(json) = map_json {
            artifacts.push(Artifact::new(format!("{BUNDLE_PATH}.map"), json));
        }
        Ok(artifacts)
    }
}

/// Whole-program minification with identifier mangling. The bundle is a
/// classic script, so top-level names stay global and are not renamed.
fn minify_aggressive(code: &str) -> BuildResult<String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, SourceType::cjs()).parse();
    if let Some(error) = parsed.errors.first() {
        return Err(BuildError::transform(
            BUNDLE_PATH,
            format!("syntax error: {error}"),
        ));
    }

    let mut program = parsed.program;
    let minified = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::default()),
    })
    .build(&allocator, &mut program);

    Ok(Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(minified.scoping)
        .build(&program)
        .code)
}

/// Line-granular source map: output line `i` came from bundle line `lines[i]`.
fn line_map(bundle: &Bundle, lines: &[usize]) -> BuildResult<String> {
    let failed = |e: parcel_sourcemap::SourceMapError| {
        BuildError::transform(format!("{BUNDLE_PATH}.map"), format!("{e:?}"))
    };

    let mut map = SourceMap::new("/");
    for source in &bundle.sources {
        let idx = map.add_source(&source.name);
        map.set_source_content(idx as usize, &source.text)
            .map_err(failed)?;
    }

    for (generated, bundle_line) in lines.iter().enumerate() {
        let Some((source, line)) = bundle.locate(*bundle_line) else {
            continue;
        };
        map.add_mapping(
            generated as u32,
            0,
            Some(OriginalLocation::new(line as u32, 0, source as u32, None)),
        );
    }

    map.to_json(None).map_err(failed)
}
