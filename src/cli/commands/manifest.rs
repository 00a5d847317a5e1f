use crate::config::fields;
use crate::env::AppEnv;
use crate::manifest::write_regional_manifest;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render the regional manifest. Only the region is resolved here; the
/// account is not needed to render a manifest.
pub fn run_manifest(
    env: &AppEnv,
    template: &Path,
    region: Option<String>,
    out_dir: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<()> {
    let region = match region {
        Some(region) => region,
        None => fields::TARGET_REGION.resolve(env.vars.as_ref())?,
    };
    let out_dir = out_dir.unwrap_or_else(|| {
        template
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let folder = write_regional_manifest(env.fs.as_ref(), template, &out_dir, &region)
        .with_context(|| format!("Failed to render manifest for region '{region}'"))?;
    writeln!(out, "{}", folder.display())?;
    Ok(())
}
