//! Upload of the rendered regional workflow manifest into the input bucket.

use super::omics::{bucket, input_bucket_name};
use super::resource::{Resource, ResourceKind, StackDefinition};
use super::StackConstructor;
use crate::config::{AppSettings, DeploymentConfiguration, TargetEnvironment};
use crate::manifest::regional_paths;
use crate::{Error, Result};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Directory holding the region-neutral template and its rendered copies.
pub const DEFAULT_MANIFEST_DIR: &str = "workflows/fastq";

pub struct ManifestUploadStack {
    settings: AppSettings,
    manifest_dir: PathBuf,
}

impl ManifestUploadStack {
    /// `manifest_dir` is the directory regional manifests are rendered into;
    /// the uploaded folder is `<manifest_dir>/<region>`.
    pub fn new(settings: AppSettings, manifest_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            manifest_dir: manifest_dir.into(),
        }
    }

    pub fn source_folder(&self, env: &TargetEnvironment) -> PathBuf {
        regional_paths(&self.manifest_dir, env.region()).0
    }
}

impl StackConstructor for ManifestUploadStack {
    fn construct(
        &self,
        id: &str,
        environment: TargetEnvironment,
        config: DeploymentConfiguration,
    ) -> Result<StackDefinition> {
        if id.trim().is_empty() {
            return Err(Error::Synth("stack id cannot be empty".to_string()));
        }

        let input = input_bucket_name(&self.settings, &environment);
        let source = self.source_folder(&environment);

        let resources = vec![
            bucket(&input, &input),
            Resource::new(
                format!(
                    "{}_deploy_regional_manifest_{}",
                    self.settings.app_name,
                    environment.region()
                ),
                ResourceKind::BucketDeployment,
                json!({
                    "SourceAsset": source.display().to_string(),
                    "DestinationBucketName": { "Ref": input },
                }),
            ),
        ];

        debug!(stack = id, source = %source.display(), "constructed manifest upload plan");

        Ok(StackDefinition {
            id: id.to_string(),
            environment,
            config,
            resources,
        })
    }
}
