//! CLI argument structures

use crate::stack::DEFAULT_MANIFEST_DIR;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_STACK_ID: &str = "omics-eventbridge-solution";
pub const DEFAULT_OUT_DIR: &str = "cdk.out";

/// Resolve deployment configuration and synthesize the HealthOmics EventBridge stack
#[derive(Parser)]
#[command(name = "omics-eventbridge")]
#[command(about = "omics-eventbridge - Synthesize the HealthOmics EventBridge workflow stack", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve configuration, construct the stack and write the deployment artifact (default)
    Synth {
        /// Identifier of the synthesized stack
        #[arg(long, default_value = DEFAULT_STACK_ID)]
        stack_id: String,

        /// Directory the artifact is written to
        #[arg(short = 'o', long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,

        /// Directory regional manifests are rendered into; `<dir>/<region>` is uploaded
        #[arg(long, default_value = DEFAULT_MANIFEST_DIR)]
        manifest_dir: PathBuf,
    },

    /// Print the resolved configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List every configuration field with its source, requirement and default
    Fields,

    /// Render a region-neutral workflow manifest for one region
    Manifest {
        /// Template containing `{aws-region}` markers
        #[arg(long)]
        template: PathBuf,

        /// Region to render for (defaults to CDK_DEFAULT_REGION or us-east-1)
        #[arg(long)]
        region: Option<String>,

        /// Output directory (defaults to the template's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}
