//! One-shot configuration resolution.
//!
//! [`ConfigResolver`] is the only place that reads configuration from the
//! environment. Its outputs are plain values handed down the call chain.

use super::deployment::DeploymentConfiguration;
use super::fields::{self, ConfigField};
use super::settings::AppSettings;
use super::target::TargetEnvironment;
use crate::env::{RealVarEnv, VarEnv};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a synthesis run needs, resolved together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub app: AppSettings,
    pub environment: TargetEnvironment,
    pub deployment: DeploymentConfiguration,
}

pub struct ConfigResolver {
    vars: Arc<dyn VarEnv>,
}

impl ConfigResolver {
    pub fn new(vars: Arc<dyn VarEnv>) -> Self {
        Self { vars }
    }

    /// Resolver over the hosting process environment.
    pub fn from_process_env() -> Self {
        Self::new(Arc::new(RealVarEnv::new()))
    }

    fn field(&self, field: &ConfigField) -> Result<String> {
        field.resolve(self.vars.as_ref())
    }

    fn positive(&self, field: &ConfigField) -> Result<u64> {
        field.resolve_positive(self.vars.as_ref())
    }

    /// Resolve the account/region pair.
    ///
    /// Fails with `MissingRequiredConfig` when `CDK_DEFAULT_ACCOUNT` is unset
    /// or empty; `CDK_DEFAULT_REGION` falls back to `us-east-1`.
    pub fn resolve_target_environment(&self) -> Result<TargetEnvironment> {
        let account = self.field(&fields::ACCOUNT)?;
        let region = self.field(&fields::TARGET_REGION)?;
        let target = TargetEnvironment::new(account, region)?;
        debug!(environment = %target, "resolved target environment");
        Ok(target)
    }

    /// Resolve the deployment parameters.
    ///
    /// Every deployment field is literal, so this never fails as the table
    /// stands; it returns `Result` so a field given an environment key later
    /// goes through the same presence and default policy.
    pub fn resolve_deployment_configuration(&self) -> Result<DeploymentConfiguration> {
        let config = DeploymentConfiguration {
            region: self.field(&fields::DEPLOYMENT_REGION)?,
            bucket_name: self.field(&fields::BUCKET_NAME)?,
            job_timeout_seconds: self.positive(&fields::JOB_TIMEOUT)?,
            message_visibility_timeout_seconds: self.positive(&fields::MESSAGE_VISIBILITY_TIMEOUT)?,
            queue_polling_frequency_seconds: self.positive(&fields::QUEUE_POLLING_FREQUENCY)?,
            requirements_file_path: PathBuf::from(self.field(&fields::REQUIREMENTS_FILE)?),
        };
        debug!(bucket = %config.bucket_name, region = %config.region, "resolved deployment configuration");
        Ok(config)
    }

    pub fn resolve_app_settings(&self) -> Result<AppSettings> {
        Ok(AppSettings {
            app_name: self.field(&fields::APP_NAME)?,
            ready2run_workflow_id: self.field(&fields::READY2RUN_WORKFLOW_ID)?,
            notification_email: self.field(&fields::NOTIFICATION_EMAIL)?,
        })
    }

    /// Resolve all three records, stopping at the first error.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let environment = self.resolve_target_environment()?;
        let deployment = self.resolve_deployment_configuration()?;
        let app = self.resolve_app_settings()?;
        info!(
            environment = %environment,
            app = %app.app_name,
            "configuration resolved"
        );
        Ok(ResolvedConfig {
            app,
            environment,
            deployment,
        })
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("vars", &"dyn VarEnv")
            .finish()
    }
}
