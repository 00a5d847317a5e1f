//! Stack construction and synthesis.
//!
//! Resolved configuration is handed by value to a [`StackConstructor`], which
//! returns a declarative [`StackDefinition`]. A [`Synthesizer`] renders the
//! collected definitions into a deployment artifact on disk. Nothing here
//! talks to a cloud API.

mod app;
mod omics;
mod resource;
mod upload;

pub use app::{App, ManifestEntry, SynthManifest, SynthOutput, MANIFEST_FILE};
pub use omics::OmicsWorkflowStack;
pub use resource::{PolicyStatement, Resource, ResourceKind, StackDefinition};
pub use upload::{ManifestUploadStack, DEFAULT_MANIFEST_DIR};

use crate::config::{DeploymentConfiguration, TargetEnvironment};
use crate::Result;

/// Turns configuration into an infrastructure definition.
pub trait StackConstructor {
    fn construct(
        &self,
        id: &str,
        environment: TargetEnvironment,
        config: DeploymentConfiguration,
    ) -> Result<StackDefinition>;
}

/// Renders infrastructure definitions into a deployment artifact.
pub trait Synthesizer {
    fn synth(&self) -> Result<SynthOutput>;
}
