use super::fields::{
    DEFAULT_BUCKET_NAME, DEFAULT_JOB_TIMEOUT_SECONDS, DEFAULT_MESSAGE_VISIBILITY_TIMEOUT_SECONDS,
    DEFAULT_QUEUE_POLLING_FREQUENCY_SECONDS, DEFAULT_REGION, DEFAULT_REQUIREMENTS_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Tunable operational parameters handed to stack construction.
///
/// `region` is independent of [`TargetEnvironment::region`](super::TargetEnvironment::region);
/// the two only share a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfiguration {
    pub region: String,
    pub bucket_name: String,
    pub job_timeout_seconds: u64,
    /// Should cover the expected processing time of one queued message.
    pub message_visibility_timeout_seconds: u64,
    pub queue_polling_frequency_seconds: u64,
    pub requirements_file_path: PathBuf,
}

impl Default for DeploymentConfiguration {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            job_timeout_seconds: DEFAULT_JOB_TIMEOUT_SECONDS,
            message_visibility_timeout_seconds: DEFAULT_MESSAGE_VISIBILITY_TIMEOUT_SECONDS,
            queue_polling_frequency_seconds: DEFAULT_QUEUE_POLLING_FREQUENCY_SECONDS,
            requirements_file_path: PathBuf::from(DEFAULT_REQUIREMENTS_FILE),
        }
    }
}

impl DeploymentConfiguration {
    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_seconds)
    }

    pub fn message_visibility_timeout(&self) -> Duration {
        Duration::from_secs(self.message_visibility_timeout_seconds)
    }

    pub fn queue_polling_frequency(&self) -> Duration {
        Duration::from_secs(self.queue_polling_frequency_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        let config = DeploymentConfiguration::default();
        assert_eq!(config.job_timeout(), Duration::from_secs(1500));
        assert_eq!(config.message_visibility_timeout(), Duration::from_secs(1200));
        assert_eq!(config.queue_polling_frequency(), Duration::from_secs(20));
    }

    #[test]
    fn test_yaml_field_names() {
        let yaml = serde_yaml::to_string(&DeploymentConfiguration::default()).unwrap();
        assert!(yaml.contains("bucket_name: omics-eventbridge-solution-dev"));
        assert!(yaml.contains("requirements_file_path: /files/requirements.txt"));
    }
}
