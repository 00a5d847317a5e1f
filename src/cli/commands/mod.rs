//! Command implementations
//!
//! Handlers take the application environment explicitly and write their
//! report to the given writer, so they run unchanged against mocks in tests.

mod config;
mod manifest;
mod synth;

pub use config::{run_config, run_fields};
pub use manifest::run_manifest;
pub use synth::run_synth;
