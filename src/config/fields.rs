//! Field policy tables.
//!
//! Every configuration value the solution uses is declared here once, with
//! the environment variable it may come from, whether it is required, and its
//! default. Resolution never looks anything up that is not in these tables.

use crate::env::VarEnv;
use crate::{Error, Result};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET_NAME: &str = "omics-eventbridge-solution-dev";
pub const DEFAULT_JOB_TIMEOUT: &str = "1500";
pub const DEFAULT_MESSAGE_VISIBILITY_TIMEOUT: &str = "1200";
pub const DEFAULT_QUEUE_POLLING_FREQUENCY: &str = "20";
pub const DEFAULT_JOB_TIMEOUT_SECONDS: u64 = parse_seconds(DEFAULT_JOB_TIMEOUT);
pub const DEFAULT_MESSAGE_VISIBILITY_TIMEOUT_SECONDS: u64 =
    parse_seconds(DEFAULT_MESSAGE_VISIBILITY_TIMEOUT);
pub const DEFAULT_QUEUE_POLLING_FREQUENCY_SECONDS: u64 =
    parse_seconds(DEFAULT_QUEUE_POLLING_FREQUENCY);
pub const DEFAULT_REQUIREMENTS_FILE: &str = "/files/requirements.txt";
pub const DEFAULT_APP_NAME: &str = "healthomics";
pub const DEFAULT_READY2RUN_WORKFLOW_ID: &str = "9500764";
pub const DEFAULT_NOTIFICATION_EMAIL: &str = "test@example.com";

/// Compile-time parse of a decimal default. A malformed literal fails the build.
const fn parse_seconds(text: &str) -> u64 {
    let bytes = text.as_bytes();
    assert!(!bytes.is_empty(), "numeric default cannot be empty");
    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii_digit(), "numeric default must be decimal");
        value = value * 10 + (bytes[i] - b'0') as u64;
        i += 1;
    }
    value
}

/// Policy for one configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    /// Field name on the resolved record.
    pub name: &'static str,
    /// Environment variable consulted, `None` for literal-only fields.
    pub env_key: Option<&'static str>,
    pub required: bool,
    pub default: Option<&'static str>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    Environment,
    Default,
}

impl ConfigField {
    /// Key used in error messages: the variable name when there is one.
    pub fn key(&self) -> &'static str {
        self.env_key.unwrap_or(self.name)
    }

    /// Resolve the raw text for this field.
    ///
    /// A present variable is used verbatim, except that an empty value counts
    /// as absent for a required field.
    pub fn resolve<E: VarEnv + ?Sized>(&self, env: &E) -> Result<String> {
        let from_env = self
            .env_key
            .and_then(|key| env.var(key))
            .filter(|value| !(self.required && value.is_empty()));

        let (value, origin) = match (from_env, self.default) {
            (Some(value), _) => (value, ValueOrigin::Environment),
            (None, Some(default)) => (default.to_string(), ValueOrigin::Default),
            (None, None) => return Err(Error::missing(self.key())),
        };

        debug!(field = self.name, key = self.key(), ?origin, "resolved configuration value");
        Ok(value)
    }

    /// Resolve and parse a strictly positive integer.
    pub fn resolve_positive<E: VarEnv + ?Sized>(&self, env: &E) -> Result<u64> {
        let raw = self.resolve(env)?;
        let value = self.parse::<u64>(&raw)?;
        if value == 0 {
            return Err(self.invalid(&raw, "must be greater than 0"));
        }
        Ok(value)
    }

    fn parse<T>(&self, raw: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| self.invalid(raw, &e.to_string()))
    }

    fn invalid(&self, raw: &str, reason: &str) -> Error {
        Error::InvalidConfigValue {
            key: self.key().to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub const ACCOUNT: ConfigField = ConfigField {
    name: "account",
    env_key: Some("CDK_DEFAULT_ACCOUNT"),
    required: true,
    default: None,
};

pub const TARGET_REGION: ConfigField = ConfigField {
    name: "region",
    env_key: Some("CDK_DEFAULT_REGION"),
    required: false,
    default: Some(DEFAULT_REGION),
};

pub const DEPLOYMENT_REGION: ConfigField = ConfigField {
    name: "region",
    env_key: None,
    required: false,
    default: Some(DEFAULT_REGION),
};

pub const BUCKET_NAME: ConfigField = ConfigField {
    name: "bucket_name",
    env_key: None,
    required: false,
    default: Some(DEFAULT_BUCKET_NAME),
};

pub const JOB_TIMEOUT: ConfigField = ConfigField {
    name: "job_timeout_seconds",
    env_key: None,
    required: false,
    default: Some(DEFAULT_JOB_TIMEOUT),
};

pub const MESSAGE_VISIBILITY_TIMEOUT: ConfigField = ConfigField {
    name: "message_visibility_timeout_seconds",
    env_key: None,
    required: false,
    default: Some(DEFAULT_MESSAGE_VISIBILITY_TIMEOUT),
};

pub const QUEUE_POLLING_FREQUENCY: ConfigField = ConfigField {
    name: "queue_polling_frequency_seconds",
    env_key: None,
    required: false,
    default: Some(DEFAULT_QUEUE_POLLING_FREQUENCY),
};

pub const REQUIREMENTS_FILE: ConfigField = ConfigField {
    name: "requirements_file_path",
    env_key: None,
    required: false,
    default: Some(DEFAULT_REQUIREMENTS_FILE),
};

pub const APP_NAME: ConfigField = ConfigField {
    name: "app_name",
    env_key: Some("CDK_APP_NAME"),
    required: false,
    default: Some(DEFAULT_APP_NAME),
};

pub const READY2RUN_WORKFLOW_ID: ConfigField = ConfigField {
    name: "ready2run_workflow_id",
    env_key: Some("READY2RUN_WORKFLOW_ID"),
    required: false,
    default: Some(DEFAULT_READY2RUN_WORKFLOW_ID),
};

pub const NOTIFICATION_EMAIL: ConfigField = ConfigField {
    name: "notification_email",
    env_key: Some("CDK_NOTIFICATION_EMAIL"),
    required: false,
    default: Some(DEFAULT_NOTIFICATION_EMAIL),
};

pub const TARGET_FIELDS: &[ConfigField] = &[ACCOUNT, TARGET_REGION];

pub const DEPLOYMENT_FIELDS: &[ConfigField] = &[
    DEPLOYMENT_REGION,
    BUCKET_NAME,
    JOB_TIMEOUT,
    MESSAGE_VISIBILITY_TIMEOUT,
    QUEUE_POLLING_FREQUENCY,
    REQUIREMENTS_FILE,
];

pub const APP_FIELDS: &[ConfigField] = &[APP_NAME, READY2RUN_WORKFLOW_ID, NOTIFICATION_EMAIL];

/// Every field, grouped by the record it belongs to.
pub fn all_fields() -> Vec<(&'static str, ConfigField)> {
    let groups: [(&'static str, &[ConfigField]); 3] = [
        ("target", TARGET_FIELDS),
        ("deployment", DEPLOYMENT_FIELDS),
        ("app", APP_FIELDS),
    ];
    groups
        .into_iter()
        .flat_map(|(group, fields)| fields.iter().map(move |field| (group, *field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockVarEnv;
    use std::collections::HashSet;

    #[test]
    fn test_required_fields_have_no_default() {
        for (_, field) in all_fields() {
            if field.required {
                assert!(field.default.is_none(), "{} is required", field.name);
                assert!(field.env_key.is_some(), "{} cannot be supplied", field.name);
            } else {
                assert!(field.default.is_some(), "{} needs a default", field.name);
            }
        }
    }

    #[test]
    fn test_each_field_listed_once() {
        let fields = all_fields();
        let unique: HashSet<_> = fields
            .iter()
            .map(|(group, field)| (*group, field.name))
            .collect();
        assert_eq!(unique.len(), fields.len());
        assert_eq!(fields.len(), 11);
    }

    #[test]
    fn test_numeric_constants_derive_from_table_defaults() {
        assert_eq!(DEFAULT_JOB_TIMEOUT_SECONDS, 1500);
        assert_eq!(DEFAULT_MESSAGE_VISIBILITY_TIMEOUT_SECONDS, 1200);
        assert_eq!(DEFAULT_QUEUE_POLLING_FREQUENCY_SECONDS, 20);
        assert_eq!(JOB_TIMEOUT.default, Some(DEFAULT_JOB_TIMEOUT));
        assert_eq!(parse_seconds("0"), 0);
        assert_eq!(parse_seconds("86400"), 86_400);
    }

    #[test]
    fn test_numeric_defaults_match_constants() {
        let env = MockVarEnv::new();
        assert_eq!(
            JOB_TIMEOUT.resolve_positive(&env).unwrap(),
            DEFAULT_JOB_TIMEOUT_SECONDS
        );
        assert_eq!(
            MESSAGE_VISIBILITY_TIMEOUT.resolve_positive(&env).unwrap(),
            DEFAULT_MESSAGE_VISIBILITY_TIMEOUT_SECONDS
        );
        assert_eq!(
            QUEUE_POLLING_FREQUENCY.resolve_positive(&env).unwrap(),
            DEFAULT_QUEUE_POLLING_FREQUENCY_SECONDS
        );
    }

    #[test]
    fn test_required_empty_value_is_missing() {
        let env = MockVarEnv::new().with_var("CDK_DEFAULT_ACCOUNT", "");
        let err = ACCOUNT.resolve(&env).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredConfig { ref key } if key == "CDK_DEFAULT_ACCOUNT"
        ));
    }

    #[test]
    fn test_optional_value_used_verbatim() {
        let env = MockVarEnv::new().with_var("CDK_APP_NAME", " spaced ");
        assert_eq!(APP_NAME.resolve(&env).unwrap(), " spaced ");
    }

    #[test]
    fn test_literal_fields_ignore_environment() {
        // A literal field has no variable, so nothing in the environment can reach it
        let env = MockVarEnv::new().with_var("bucket_name", "elsewhere");
        assert_eq!(BUCKET_NAME.resolve(&env).unwrap(), DEFAULT_BUCKET_NAME);
    }

    #[test]
    fn test_positive_rejects_zero_and_garbage() {
        let zero = ConfigField {
            name: "interval",
            env_key: Some("INTERVAL_SECONDS"),
            required: false,
            default: Some("10"),
        };

        let env = MockVarEnv::new().with_var("INTERVAL_SECONDS", "0");
        let err = zero.resolve_positive(&env).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref key, .. } if key == "INTERVAL_SECONDS"));

        env.set_var("INTERVAL_SECONDS", "ten");
        assert!(zero.resolve_positive(&env).is_err());

        env.set_var("INTERVAL_SECONDS", "45");
        assert_eq!(zero.resolve_positive(&env).unwrap(), 45);
    }
}
