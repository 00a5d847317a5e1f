use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The account/region pair infrastructure is provisioned into.
///
/// The account is never defaulted, so a value of this type always carries a
/// non-empty account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTargetEnvironment")]
pub struct TargetEnvironment {
    account: String,
    region: String,
}

#[derive(Deserialize)]
struct RawTargetEnvironment {
    account: String,
    region: String,
}

impl TryFrom<RawTargetEnvironment> for TargetEnvironment {
    type Error = Error;

    fn try_from(raw: RawTargetEnvironment) -> Result<Self> {
        Self::new(raw.account, raw.region)
    }
}

impl TargetEnvironment {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let account = account.into();
        if account.is_empty() {
            return Err(Error::missing("CDK_DEFAULT_ACCOUNT"));
        }
        Ok(Self {
            account,
            region: region.into(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// `aws://{account}/{region}`, the form used in synthesized manifests.
    pub fn uri(&self) -> String {
        format!("aws://{}/{}", self.account, self.region)
    }
}

impl fmt::Display for TargetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_account() {
        assert!(matches!(
            TargetEnvironment::new("", "us-east-1"),
            Err(Error::MissingRequiredConfig { .. })
        ));
    }

    #[test]
    fn test_uri() {
        let env = TargetEnvironment::new("123456789012", "eu-west-1").unwrap();
        assert_eq!(env.uri(), "aws://123456789012/eu-west-1");
        assert_eq!(env.to_string(), env.uri());
    }

    #[test]
    fn test_deserialize_validates_account() {
        let ok: TargetEnvironment =
            serde_json::from_str(r#"{"account":"1","region":"us-west-2"}"#).unwrap();
        assert_eq!(ok.account(), "1");

        let bad = serde_json::from_str::<TargetEnvironment>(r#"{"account":"","region":"x"}"#);
        assert!(bad.is_err());
    }
}
