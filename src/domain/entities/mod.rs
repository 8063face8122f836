//! Domain Entities

mod artifact;

pub use artifact::{Artifact, ArtifactSet};
