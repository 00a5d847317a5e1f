//! Mock environment implementations for testing
//!
//! These implementations use in-memory data structures and provide controlled,
//! predictable behavior for testing without touching the process environment
//! or the disk.

use super::traits::{FileEnv, VarEnv};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory variable source
///
/// # Examples
///
/// ```
/// use omics_eventbridge::env::{MockVarEnv, VarEnv};
///
/// let env = MockVarEnv::new().with_var("CDK_DEFAULT_ACCOUNT", "123456789012");
/// assert_eq!(env.var("CDK_DEFAULT_ACCOUNT").as_deref(), Some("123456789012"));
/// assert_eq!(env.var("CDK_DEFAULT_REGION"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockVarEnv {
    vars: Arc<Mutex<HashMap<String, String>>>,
}

impl MockVarEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = Self::new();
        for (key, value) in pairs {
            env.set_var(key, value);
        }
        env
    }

    /// Builder-style variant of [`MockVarEnv::set_var`]
    pub fn with_var(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_var(key, value);
        self
    }

    pub fn set_var(&self, key: impl Into<String>, value: impl Into<String>) {
        lock(&self.vars).insert(key.into(), value.into());
    }

    pub fn remove_var(&self, key: &str) {
        lock(&self.vars).remove(key);
    }
}

impl VarEnv for MockVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        lock(&self.vars).get(key).cloned()
    }
}

/// Mock file system for testing
///
/// Stores files in memory. Directories are tracked only so `exists` answers
/// consistently for paths passed to `create_dir_all`.
#[derive(Debug, Clone, Default)]
pub struct MockFileEnv {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MockFileEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock file system
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        lock(&self.files).insert(path.into(), content.into());
    }

    /// Get all files in the mock file system
    pub fn files(&self) -> HashMap<PathBuf, String> {
        lock(&self.files).clone()
    }

    /// Contents of a single file, if written
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }
}

impl FileEnv for MockFileEnv {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        lock(&self.files).get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        lock(&self.files).insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        lock(&self.files).contains_key(path) || lock(&self.dirs).contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        let mut dirs = lock(&self.dirs);
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}
