//! Per-environment step plans
//!
//! Every task asks for its plan once, at construction. Transforms walk the
//! plan in order instead of branching on the environment inline, so a test can
//! assert exactly which steps a task performs for a given environment.

use crate::domain::value_objects::{BuildEnv, TaskKind};

/// A single pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Expand `@@include(...)` directives and context variables
    ExpandIncludes,
    /// Collapse whitespace and strip comments from HTML
    CollapseHtml,
    /// Start recording a source map
    SourceMapInit,
    /// Expand utility-class directives
    ExpandUtilities,
    /// Add vendor prefixes for the configured browser targets
    VendorPrefix,
    /// Minify the stylesheet
    Compact,
    /// Insert `.min` before the output extension
    RenameMin,
    /// Join all scripts into one bundle
    Concat,
    /// Fast, line-preserving minifier
    MinifyLoose,
    /// Whole-program minifier
    MinifyAggressive,
    /// Emit the recorded source map beside the artifact
    SourceMapWrite,
    /// Copy bytes unchanged
    Copy,
    /// Write artifacts under the output root
    Write,
    /// Log the size of each artifact
    ReportSize,
    /// Notify connected browsers
    Reload,
}

/// Ordered list of steps for one task in one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    task: TaskKind,
    env: BuildEnv,
    steps: Vec<Step>,
}

impl StepPlan {
    pub fn for_task(task: TaskKind, env: BuildEnv) -> Self {
        use Step::*;

        let dev = !env.is_production();
        let mut steps = Vec::new();
        let mut push_if = |cond: bool, step: Step| {
            if cond {
                steps.push(step);
            }
        };

        match task {
            TaskKind::Html => {
                push_if(true, ExpandIncludes);
                push_if(!dev, CollapseHtml);
            }
            TaskKind::Css => {
                push_if(dev, SourceMapInit);
                push_if(true, ExpandUtilities);
                push_if(true, VendorPrefix);
                push_if(!dev, Compact);
                push_if(true, RenameMin);
                push_if(dev, SourceMapWrite);
            }
            TaskKind::Javascript => {
                push_if(dev, SourceMapInit);
                push_if(true, Concat);
                push_if(dev, MinifyLoose);
                push_if(!dev, MinifyAggressive);
                push_if(dev, SourceMapWrite);
            }
            TaskKind::Assets => {
                push_if(true, Copy);
            }
        }

        push_if(true, Write);
        push_if(true, ReportSize);
        // Assets always signal; the rest only when a dev server can listen
        push_if(dev || task == TaskKind::Assets, Reload);

        Self { task, env, steps }
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn env(&self) -> BuildEnv {
        self.env
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn contains(&self, step: Step) -> bool {
        self.steps.contains(&step)
    }

    /// Steps that transform content (everything before `Write`)
    pub fn transform_steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().copied().take_while(|s| *s != Step::Write)
    }
}
