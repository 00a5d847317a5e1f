use crate::cli::args::OutputFormat;
use crate::config::{all_fields, ConfigResolver};
use crate::env::AppEnv;
use anyhow::{Context, Result};
use std::io::Write;

pub fn run_config(env: &AppEnv, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let resolved = ConfigResolver::new(env.vars.clone())
        .resolve()
        .context("Failed to resolve deployment configuration")?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&resolved)?,
        OutputFormat::Yaml => serde_yaml::to_string(&resolved)?,
    };
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

/// Print the field policy table. Reads no environment state.
pub fn run_fields(out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{:<11} {:<35} {:<23} {:<9} DEFAULT",
        "GROUP", "FIELD", "ENV", "REQUIRED"
    )?;
    for (group, field) in all_fields() {
        writeln!(
            out,
            "{:<11} {:<35} {:<23} {:<9} {}",
            group,
            field.name,
            field.env_key.unwrap_or("-"),
            if field.required { "yes" } else { "no" },
            field.default.unwrap_or("-"),
        )?;
    }
    Ok(())
}
