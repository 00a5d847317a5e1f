//! Environment trait definitions for dependency injection and testing
//!
//! Configuration resolution and synthesis only touch the outside world through
//! these traits, so the same code runs against the real process or an
//! in-memory fixture.

use std::path::Path;

/// Process environment variable lookup
///
/// Abstracts `std::env::var` so configuration can be resolved from an
/// injected mapping instead of mutating the real process environment.
///
/// # Examples
///
/// ```
/// use omics_eventbridge::env::{MockVarEnv, VarEnv};
///
/// fn region<E: VarEnv + ?Sized>(env: &E) -> String {
///     env.var("CDK_DEFAULT_REGION").unwrap_or_else(|| "us-east-1".to_string())
/// }
///
/// let env = MockVarEnv::new().with_var("CDK_DEFAULT_REGION", "eu-west-1");
/// assert_eq!(region(&env), "eu-west-1");
/// ```
pub trait VarEnv: Send + Sync {
    /// Look up a variable. Unset (or non-unicode) variables are `None`.
    fn var(&self, key: &str) -> Option<String>;
}

/// File system operations trait
///
/// Abstracts the file system interactions needed to render manifests and
/// write synthesized stacks.
pub trait FileEnv: Send + Sync {
    /// Read a file's contents as a string
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write a string to a file
    fn write(&self, path: &Path, content: &str) -> std::io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory (and all parent directories)
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}
