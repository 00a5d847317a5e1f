use crate::config::ConfigResolver;
use crate::env::AppEnv;
use crate::stack::{App, ManifestUploadStack, OmicsWorkflowStack, StackConstructor, Synthesizer};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Suffix of the stack that uploads the regional manifest.
pub const MANIFEST_UPLOAD_SUFFIX: &str = "-manifest-upload";

/// Resolve, construct and synthesize. Configuration errors abort before any
/// stack is constructed or any file is written.
pub fn run_synth(
    env: &AppEnv,
    stack_id: &str,
    out_dir: &Path,
    manifest_dir: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let resolver = ConfigResolver::new(env.vars.clone());
    let resolved = resolver
        .resolve()
        .context("Failed to resolve deployment configuration")?;

    let workflow = OmicsWorkflowStack::new(resolved.app.clone())
        .construct(
            stack_id,
            resolved.environment.clone(),
            resolved.deployment.clone(),
        )
        .with_context(|| format!("Failed to construct stack '{stack_id}'"))?;

    let upload_id = format!("{stack_id}{MANIFEST_UPLOAD_SUFFIX}");
    let upload = ManifestUploadStack::new(resolved.app, manifest_dir)
        .construct(&upload_id, resolved.environment, resolved.deployment)
        .with_context(|| format!("Failed to construct stack '{upload_id}'"))?;

    let mut app = App::new(out_dir, env.fs.clone());
    app.add_stack(workflow)?;
    app.add_stack(upload)?;
    let output = app
        .synth()
        .with_context(|| format!("Failed to synthesize into {}", out_dir.display()))?;

    info!(stack = stack_id, stacks = output.templates.len(), "stacks synthesized");
    for template in &output.templates {
        writeln!(out, "{}", template.display())?;
    }
    writeln!(out, "{}", output.manifest.display())?;
    Ok(())
}
