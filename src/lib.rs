//! # omics-eventbridge
//!
//! Resolves the deployment configuration for the HealthOmics EventBridge
//! workflow solution and synthesizes its stack plan.
//!
//! ## Usage
//!
//! ```bash
//! CDK_DEFAULT_ACCOUNT=123456789012 omics-eventbridge synth [-o cdk.out]
//! ```
//!
//! ## Modules
//!
//! - `env` - Injectable environment variable and file system access
//! - `config` - Field policy tables and the one-shot `ConfigResolver`
//! - `stack` - Stack plan construction and synthesis
//! - `manifest` - Regional workflow manifest rendering
//! - `cli` - Command-line arguments and handlers
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod manifest;
pub mod stack;

pub use error::{Error, Result};
