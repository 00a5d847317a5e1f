//! Real environment implementations that interact with the actual system

use super::traits::{FileEnv, VarEnv};
use std::fs;
use std::path::Path;

/// Reads variables from the hosting process environment.
#[derive(Debug, Clone, Default)]
pub struct RealVarEnv;

impl RealVarEnv {
    pub fn new() -> Self {
        Self
    }
}

impl VarEnv for RealVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Real file system implementation
///
/// Delegates all operations to the standard library's `std::fs` module.
#[derive(Debug, Clone, Default)]
pub struct RealFileEnv;

impl RealFileEnv {
    pub fn new() -> Self {
        Self
    }
}

impl FileEnv for RealFileEnv {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        fs::create_dir_all(path)
    }
}
