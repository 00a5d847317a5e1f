//! Combined application environment

use super::mock::{MockFileEnv, MockVarEnv};
use super::real::{RealFileEnv, RealVarEnv};
use super::traits::{FileEnv, VarEnv};
use std::sync::Arc;

/// Combined application environment
///
/// Bundles the variable source and the file system. Can be constructed with
/// real or mock implementations for testing.
///
/// # Examples
///
/// ```
/// use omics_eventbridge::env::AppEnv;
///
/// // Production
/// let env = AppEnv::real();
///
/// // Tests
/// let test_env = AppEnv::mock();
/// ```
#[derive(Clone)]
pub struct AppEnv {
    pub vars: Arc<dyn VarEnv>,
    pub fs: Arc<dyn FileEnv>,
}

impl AppEnv {
    /// Create an environment backed by the process environment and the disk
    pub fn real() -> Self {
        Self {
            vars: Arc::new(RealVarEnv::new()),
            fs: Arc::new(RealFileEnv::new()),
        }
    }

    /// Create an environment with empty in-memory implementations
    pub fn mock() -> Self {
        Self {
            vars: Arc::new(MockVarEnv::new()),
            fs: Arc::new(MockFileEnv::new()),
        }
    }

    /// Create a custom environment with specific implementations
    pub fn custom(vars: Arc<dyn VarEnv>, fs: Arc<dyn FileEnv>) -> Self {
        Self { vars, fs }
    }
}

impl std::fmt::Debug for AppEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnv")
            .field("vars", &"dyn VarEnv")
            .field("fs", &"dyn FileEnv")
            .finish()
    }
}
