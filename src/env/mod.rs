//! Environment abstraction layer for dependency injection and testing
//!
//! All reads of process environment variables and all file writes go through
//! the traits defined here:
//! - **Traits**: [`VarEnv`] and [`FileEnv`] define capabilities
//! - **Real Implementations**: the process environment and `std::fs`
//! - **Mock Implementations**: in-memory maps for tests
//! - **Combined Environment**: [`AppEnv`] bundles both capabilities
//!
//! # Testing
//!
//! ```
//! use omics_eventbridge::config::ConfigResolver;
//! use omics_eventbridge::env::MockVarEnv;
//! use std::sync::Arc;
//!
//! let vars = MockVarEnv::new().with_var("CDK_DEFAULT_ACCOUNT", "123456789012");
//! let resolver = ConfigResolver::new(Arc::new(vars));
//! let target = resolver.resolve_target_environment().unwrap();
//! assert_eq!(target.region(), "us-east-1");
//! ```

mod app;
mod mock;
mod real;
mod traits;

pub use app::AppEnv;
pub use mock::{MockFileEnv, MockVarEnv};
pub use real::{RealFileEnv, RealVarEnv};
pub use traits::{FileEnv, VarEnv};
