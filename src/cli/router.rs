//! Command routing and execution

use crate::cli::args::{Commands, DEFAULT_OUT_DIR, DEFAULT_STACK_ID};
use crate::cli::commands::{run_config, run_fields, run_manifest, run_synth};
use crate::env::AppEnv;
use crate::stack::DEFAULT_MANIFEST_DIR;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Execute a CLI command based on the parsed arguments.
///
/// No subcommand means `synth` with default arguments.
pub fn execute_command(command: Option<Commands>, env: &AppEnv, out: &mut dyn Write) -> Result<()> {
    match command {
        Some(Commands::Synth {
            stack_id,
            out_dir,
            manifest_dir,
        }) => run_synth(env, &stack_id, &out_dir, &manifest_dir, out),
        Some(Commands::Config { format }) => run_config(env, format, out),
        Some(Commands::Fields) => run_fields(out),
        Some(Commands::Manifest {
            template,
            region,
            out_dir,
        }) => run_manifest(env, &template, region, out_dir, out),
        None => run_synth(
            env,
            DEFAULT_STACK_ID,
            Path::new(DEFAULT_OUT_DIR),
            Path::new(DEFAULT_MANIFEST_DIR),
            out,
        ),
    }
}
