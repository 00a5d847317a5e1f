use crate::config::{DeploymentConfiguration, TargetEnvironment};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Kind of infrastructure resource in a stack plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "AWS::S3::Bucket")]
    Bucket,
    #[serde(rename = "AWS::SNS::Topic")]
    Topic,
    #[serde(rename = "AWS::SNS::Subscription")]
    Subscription,
    #[serde(rename = "AWS::SNS::TopicPolicy")]
    TopicPolicy,
    #[serde(rename = "AWS::Events::Rule")]
    EventRule,
    #[serde(rename = "AWS::IAM::Role")]
    Role,
    #[serde(rename = "AWS::Lambda::Function")]
    Function,
    #[serde(rename = "AWS::Lambda::Permission")]
    Permission,
    /// S3 event notification configuration attached to an existing bucket.
    #[serde(rename = "Custom::S3BucketNotifications")]
    BucketNotification,
    /// Upload of a local asset folder into a bucket.
    #[serde(rename = "Custom::CDKBucketDeployment")]
    BucketDeployment,
    #[serde(rename = "AWS::SQS::Queue")]
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub logical_id: String,
    #[serde(rename = "Type")]
    pub kind: ResourceKind,
    #[serde(rename = "Properties")]
    pub properties: Value,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, kind: ResourceKind, properties: Value) -> Self {
        Self {
            logical_id: logical_id.into(),
            kind,
            properties,
        }
    }
}

/// An IAM policy statement attached to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub effect: String,
    pub action: Vec<String>,
    pub resource: Vec<String>,
}

impl PolicyStatement {
    pub fn allow<A, R>(actions: A, resources: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            effect: "Allow".to_string(),
            action: actions.into_iter().map(Into::into).collect(),
            resource: resources.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "Effect": self.effect,
            "Action": self.action,
            "Resource": self.resource,
        })
    }
}

/// A constructed stack: where it goes, what it was configured with, and the
/// resources it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinition {
    pub id: String,
    pub environment: TargetEnvironment,
    pub config: DeploymentConfiguration,
    pub resources: Vec<Resource>,
}

impl StackDefinition {
    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }

    pub fn resources_of(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources_of(kind).count()
    }

    /// Render as a CloudFormation-shaped template keyed by logical id.
    pub fn to_template(&self) -> Value {
        let resources: serde_json::Map<String, Value> = self
            .resources
            .iter()
            .map(|r| {
                (
                    r.logical_id.clone(),
                    json!({ "Type": r.kind, "Properties": r.properties }),
                )
            })
            .collect();

        json!({
            "Description": format!("{} ({})", self.id, self.environment),
            "Metadata": {
                "Environment": self.environment,
                "DeploymentConfiguration": self.config,
            },
            "Resources": resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_serializes_as_cloudformation_type() {
        assert_eq!(
            serde_json::to_value(ResourceKind::Function).unwrap(),
            json!("AWS::Lambda::Function")
        );
        assert_eq!(
            serde_json::to_value(ResourceKind::BucketNotification).unwrap(),
            json!("Custom::S3BucketNotifications")
        );
    }

    #[test]
    fn test_policy_statement_value() {
        let stmt = PolicyStatement::allow(["s3:GetObject"], ["arn:aws:s3:::bucket/*"]);
        assert_eq!(
            stmt.to_value(),
            json!({
                "Effect": "Allow",
                "Action": ["s3:GetObject"],
                "Resource": ["arn:aws:s3:::bucket/*"],
            })
        );
    }

    #[test]
    fn test_template_keys_resources_by_logical_id() {
        let stack = StackDefinition {
            id: "test".to_string(),
            environment: TargetEnvironment::new("1", "us-east-1").unwrap(),
            config: DeploymentConfiguration::default(),
            resources: vec![Resource::new("Bucket", ResourceKind::Bucket, json!({}))],
        };
        let template = stack.to_template();
        assert_eq!(template["Resources"]["Bucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(template["Metadata"]["Environment"]["account"], "1");
        assert_eq!(template["Description"], "test (aws://1/us-east-1)");
    }
}
