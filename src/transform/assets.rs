//! Assets task: byte-for-byte copy of images

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{Artifact, ArtifactSet};
use crate::domain::policies::{Step, StepPlan};
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::BuildResult;
use crate::transform::files::{glob_base, list_files, read_bytes, relative_to};
use crate::transform::Task;

/// Output directory for images, relative to the output root
pub const IMAGES_DIR: &str = "images";

pub struct AssetsTask {
    root: PathBuf,
    images: String,
    plan: StepPlan,
}

impl AssetsTask {
    pub fn new(root: &Path, config: &Config, env: BuildEnv) -> Self {
        Self {
            root: root.to_path_buf(),
            images: config.paths.images.clone(),
            plan: StepPlan::for_task(TaskKind::Assets, env),
        }
    }
}

impl Task for AssetsTask {
    fn kind(&self) -> TaskKind {
        TaskKind::Assets
    }

    fn plan(&self) -> &StepPlan {
        &self.plan
    }

    fn run(&self) -> BuildResult<ArtifactSet> {
        let mut artifacts = ArtifactSet::new();
        if !self.plan.contains(Step::Copy) {
            return Ok(artifacts);
        }

        let base = self.root.join(glob_base(&self.images));
        for file in list_files(&self.root, &self.images)? {
            let relative = relative_to(&file, &base)?;
            artifacts.push(Artifact::new(
                Path::new(IMAGES_DIR).join(relative),
                read_bytes(&file)?,
            ));
        }
        Ok(artifacts)
    }
}
