use super::resource::StackDefinition;
use super::Synthesizer;
use crate::env::FileEnv;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Entry in the synthesized `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub environment: String,
    pub template_file: String,
    pub resource_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthManifest {
    pub version: String,
    pub stacks: Vec<ManifestEntry>,
}

/// Paths written by a synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthOutput {
    pub out_dir: PathBuf,
    pub templates: Vec<PathBuf>,
    pub manifest: PathBuf,
}

/// Collects constructed stacks and writes them out as a deployment artifact.
pub struct App {
    out_dir: PathBuf,
    fs: Arc<dyn FileEnv>,
    stacks: Vec<StackDefinition>,
}

impl App {
    pub fn new(out_dir: impl Into<PathBuf>, fs: Arc<dyn FileEnv>) -> Self {
        Self {
            out_dir: out_dir.into(),
            fs,
            stacks: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn add_stack(&mut self, stack: StackDefinition) -> Result<()> {
        if self.stacks.iter().any(|s| s.id == stack.id) {
            return Err(Error::Synth(format!("duplicate stack id: {}", stack.id)));
        }
        debug!(stack = %stack.id, "added stack");
        self.stacks.push(stack);
        Ok(())
    }

    pub fn stacks(&self) -> &[StackDefinition] {
        &self.stacks
    }

    fn template_file(stack: &StackDefinition) -> String {
        format!("{}.template.json", stack.id)
    }
}

impl Synthesizer for App {
    fn synth(&self) -> Result<SynthOutput> {
        if self.stacks.is_empty() {
            return Err(Error::Synth("no stacks to synthesize".to_string()));
        }

        self.fs.create_dir_all(&self.out_dir)?;

        let mut templates = Vec::with_capacity(self.stacks.len());
        let mut entries = Vec::with_capacity(self.stacks.len());
        for stack in &self.stacks {
            let file = Self::template_file(stack);
            let path = self.out_dir.join(&file);
            let body = serde_json::to_string_pretty(&stack.to_template())?;
            self.fs.write(&path, &body)?;
            debug!(path = %path.display(), "wrote stack template");

            entries.push(ManifestEntry {
                id: stack.id.clone(),
                environment: stack.environment.uri(),
                template_file: file,
                resource_count: stack.resources.len(),
            });
            templates.push(path);
        }

        let manifest = SynthManifest {
            version: env!("CARGO_PKG_VERSION").to_string(),
            stacks: entries,
        };
        let manifest_path = self.out_dir.join(MANIFEST_FILE);
        self.fs
            .write(&manifest_path, &serde_json::to_string_pretty(&manifest)?)?;

        info!(
            out_dir = %self.out_dir.display(),
            stacks = templates.len(),
            "synthesis complete"
        );

        Ok(SynthOutput {
            out_dir: self.out_dir.clone(),
            templates,
            manifest: manifest_path,
        })
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("out_dir", &self.out_dir)
            .field("fs", &"dyn FileEnv")
            .field("stacks", &self.stacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppSettings, DeploymentConfiguration, TargetEnvironment};
    use crate::env::MockFileEnv;
    use crate::stack::{OmicsWorkflowStack, StackConstructor};

    fn stack(id: &str) -> StackDefinition {
        OmicsWorkflowStack::new(AppSettings::default())
            .construct(
                id,
                TargetEnvironment::new("123456789012", "us-east-1").unwrap(),
                DeploymentConfiguration::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_synth_writes_templates_and_manifest() {
        let fs = MockFileEnv::new();
        let mut app = App::new("cdk.out", Arc::new(fs.clone()));
        app.add_stack(stack("omics-eventbridge-solution")).unwrap();

        let output = app.synth().unwrap();
        assert_eq!(
            output.templates,
            vec![PathBuf::from("cdk.out/omics-eventbridge-solution.template.json")]
        );
        assert!(fs.exists(Path::new("cdk.out")));

        let manifest: SynthManifest =
            serde_json::from_str(&fs.file("cdk.out/manifest.json").unwrap()).unwrap();
        assert_eq!(manifest.stacks.len(), 1);
        assert_eq!(manifest.stacks[0].environment, "aws://123456789012/us-east-1");
        assert_eq!(
            manifest.stacks[0].template_file,
            "omics-eventbridge-solution.template.json"
        );

        let template: serde_json::Value = serde_json::from_str(
            &fs.file("cdk.out/omics-eventbridge-solution.template.json")
                .unwrap(),
        )
        .unwrap();
        assert_eq!(
            template["Metadata"]["DeploymentConfiguration"]["bucket_name"],
            "omics-eventbridge-solution-dev"
        );
    }

    #[test]
    fn test_synth_without_stacks_fails() {
        let fs = MockFileEnv::new();
        let app = App::new("cdk.out", Arc::new(fs.clone()));
        assert!(matches!(app.synth(), Err(Error::Synth(_))));
        assert!(fs.files().is_empty());
    }

    #[test]
    fn test_duplicate_stack_ids_rejected() {
        let mut app = App::new("cdk.out", Arc::new(MockFileEnv::new()));
        app.add_stack(stack("a")).unwrap();
        assert!(app.add_stack(stack("a")).is_err());
        app.add_stack(stack("b")).unwrap();
        assert_eq!(app.stacks().len(), 2);
    }
}
