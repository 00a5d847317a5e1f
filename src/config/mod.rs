//! Deployment configuration.
//!
//! Configuration comes from three places, all declared in [`fields`]:
//!
//! 1. Required environment variables (`CDK_DEFAULT_ACCOUNT`)
//! 2. Optional environment variables with defaults (`CDK_DEFAULT_REGION`, `CDK_APP_NAME`, ...)
//! 3. Literal constants (bucket name, timeouts, requirements file)
//!
//! [`ConfigResolver`] turns them into a [`TargetEnvironment`], a
//! [`DeploymentConfiguration`] and [`AppSettings`].

mod deployment;
pub mod fields;
mod resolver;
mod settings;
mod target;

pub use deployment::DeploymentConfiguration;
pub use fields::{all_fields, ConfigField};
pub use resolver::{ConfigResolver, ResolvedConfig};
pub use settings::AppSettings;
pub use target::TargetEnvironment;
