//! CLI command handlers
//!
//! - Argument parsing structures
//! - Command implementations
//! - Routing from parsed arguments to handlers
//! - Logging setup

pub mod args;
pub mod commands;
pub mod logging;
pub mod router;

pub use args::{Cli, Commands, OutputFormat};
pub use logging::{init_tracing, log_filter};
pub use router::execute_command;
