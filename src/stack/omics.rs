//! Resource plan for the HealthOmics EventBridge workflow.
//!
//! Input FASTQ manifests land in the input bucket and trigger the initial
//! workflow function. HealthOmics run status changes are routed through
//! EventBridge: failures notify the status topic, completions start the
//! post-initial workflow.

use super::resource::{PolicyStatement, Resource, ResourceKind, StackDefinition};
use super::StackConstructor;
use crate::config::{AppSettings, DeploymentConfiguration, TargetEnvironment};
use crate::{Error, Result};
use serde_json::{json, Value};
use tracing::debug;

const FUNCTION_TIMEOUT_SECONDS: u64 = 60;
const FUNCTION_RUNTIME: &str = "python3.8";
const OMICS_EVENT_SOURCE: &str = "aws.omics";
const RUN_STATUS_CHANGE: &str = "Run Status Change";
const WORKFLOW_LOG_GROUP: &str = "/aws/omics/WorkflowLog";
const EVENTS_SERVICE: &str = "events.amazonaws.com";

const PUBLIC_REFERENCE_BUCKETS: &[&str] = &["broad-references", "giab"];

pub struct OmicsWorkflowStack {
    settings: AppSettings,
}

impl OmicsWorkflowStack {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    pub fn input_bucket_name(&self, env: &TargetEnvironment) -> String {
        input_bucket_name(&self.settings, env)
    }

    pub fn output_bucket_name(&self, env: &TargetEnvironment) -> String {
        format!(
            "{}-cka-output-{}-{}",
            self.settings.app_name,
            env.account(),
            env.region()
        )
    }

    pub fn status_topic_name(&self) -> String {
        format!("{}_workflow_status_topic", self.settings.app_name)
    }

    fn name(&self, suffix: &str) -> String {
        format!("{}{}", self.settings.app_name, suffix)
    }
}

/// Bucket FASTQ manifests are uploaded to. Shared with the manifest upload
/// stack.
pub(super) fn input_bucket_name(settings: &AppSettings, env: &TargetEnvironment) -> String {
    format!(
        "{}-cka-input-{}-{}",
        settings.app_name,
        env.account(),
        env.region()
    )
}

fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}

fn bucket_and_objects(buckets: &[&str]) -> Vec<String> {
    let mut arns: Vec<String> = buckets.iter().map(|b| bucket_arn(b)).collect();
    arns.extend(buckets.iter().map(|b| format!("{}/*", bucket_arn(b))));
    arns
}

fn role_arn(env: &TargetEnvironment, role: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", env.account(), role)
}

fn ecr_registry(env: &TargetEnvironment) -> String {
    format!("{}.dkr.ecr.{}.amazonaws.com", env.account(), env.region())
}

pub(super) fn bucket(logical_id: &str, bucket_name: &str) -> Resource {
    Resource::new(
        logical_id,
        ResourceKind::Bucket,
        json!({ "BucketName": bucket_name, "EnforceSSL": true }),
    )
}

fn role(logical_id: &str, service: &str, managed: &[&str], statements: &[PolicyStatement]) -> Resource {
    Resource::new(
        logical_id,
        ResourceKind::Role,
        json!({
            "RoleName": logical_id,
            "AssumeRolePolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": "sts:AssumeRole",
                    "Effect": "Allow",
                    "Principal": { "Service": service },
                }],
            },
            "ManagedPolicyArns": managed
                .iter()
                .map(|p| format!("arn:aws:iam::aws:policy/{p}"))
                .collect::<Vec<_>>(),
            "Policies": [{
                "PolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": statements.iter().map(PolicyStatement::to_value).collect::<Vec<_>>(),
                },
            }],
        }),
    )
}

fn status_rule(logical_id: &str, status: &str, target: Value) -> Resource {
    Resource::new(
        logical_id,
        ResourceKind::EventRule,
        json!({
            "EventPattern": {
                "source": [OMICS_EVENT_SOURCE],
                "detail-type": [RUN_STATUS_CHANGE],
                "detail": { "status": [status] },
            },
            "Targets": [target],
        }),
    )
}

impl StackConstructor for OmicsWorkflowStack {
    fn construct(
        &self,
        id: &str,
        environment: TargetEnvironment,
        config: DeploymentConfiguration,
    ) -> Result<StackDefinition> {
        if id.trim().is_empty() {
            return Err(Error::Synth("stack id cannot be empty".to_string()));
        }

        let env = &environment;
        let region = env.region();
        let input = self.input_bucket_name(env);
        let output = self.output_bucket_name(env);
        let topic = self.status_topic_name();
        let omics_role = self.name("-omics-service-role");
        let lambda_role = self.name("-lambda-role");
        let initial_fn = self.name("_initial_workflow_lambda");
        let post_fn = self.name("_post_initial_workflow_lambda");
        let output_location = format!("s3://{output}/outputs");

        let mut resources = vec![
            bucket("SolutionBucket", &config.bucket_name),
            bucket(&input, &input),
            bucket(&output, &output),
            Resource::new(
                &topic,
                ResourceKind::Topic,
                json!({ "TopicName": topic, "DisplayName": topic }),
            ),
            Resource::new(
                self.name("_workflow_status_subscription"),
                ResourceKind::Subscription,
                json!({
                    "Protocol": "email",
                    "Endpoint": self.settings.notification_email,
                    "TopicArn": { "Ref": topic },
                }),
            ),
            status_rule(
                &self.name("_rule_workflow_status_topic"),
                "FAILED",
                json!({ "Arn": { "Ref": topic } }),
            ),
            Resource::new(
                self.name("_workflow_status_topic_policy"),
                ResourceKind::TopicPolicy,
                json!({
                    "Topics": [{ "Ref": topic }],
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Principal": { "Service": EVENTS_SERVICE },
                            "Action": "sns:Publish",
                            "Resource": { "Ref": topic },
                        }],
                    },
                }),
            ),
        ];

        let omics_statements = vec![
            PolicyStatement::allow(
                ["s3:ListBucket", "s3:GetObject"],
                bucket_and_objects(&[input.as_str(), output.as_str()]),
            ),
            PolicyStatement::allow(
                ["s3:ListBucket", "s3:PutObject"],
                bucket_and_objects(&[output.as_str()]),
            ),
            PolicyStatement::allow(
                [
                    "ecr:BatchGetImage",
                    "ecr:GetDownloadUrlForLayer",
                    "ecr:BatchCheckLayerAvailability",
                ],
                [format!("arn:aws:ecr:{region}:{}:repository/*", env.account())],
            ),
            PolicyStatement::allow(
                [
                    "logs:CreateLogGroup",
                    "logs:DescribeLogStreams",
                    "logs:CreateLogStream",
                    "logs:PutLogEvents",
                ],
                [
                    format!(
                        "arn:aws:logs:{region}:{}:log-group:{WORKFLOW_LOG_GROUP}:log-stream:*",
                        env.account()
                    ),
                    format!(
                        "arn:aws:logs:{region}:{}:log-group:{WORKFLOW_LOG_GROUP}:*",
                        env.account()
                    ),
                ],
            ),
            PolicyStatement::allow(["kms:Decrypt", "kms:GenerateDataKey"], ["*"]),
            PolicyStatement::allow(["s3:Get*", "s3:List*"], {
                let static_bucket = format!("aws-genomics-static-{region}");
                let omics_bucket = format!("omics-{region}");
                let mut buckets: Vec<&str> = PUBLIC_REFERENCE_BUCKETS.to_vec();
                buckets.push(&static_bucket);
                buckets.push(&omics_bucket);
                bucket_and_objects(&buckets)
            }),
        ];
        resources.push(role(
            &omics_role,
            "omics.amazonaws.com",
            &[],
            &omics_statements,
        ));

        let lambda_statements = vec![
            PolicyStatement::allow(["iam:PassRole"], [role_arn(env, &omics_role)]),
            PolicyStatement::allow(
                ["s3:ListBucket", "s3:GetObject", "s3:PutObject"],
                bucket_and_objects(&[input.as_str(), output.as_str()]),
            ),
            PolicyStatement::allow(
                ["omics:StartRun", "omics:TagResource", "omics:GetRun"],
                ["*"],
            ),
        ];
        resources.push(role(
            &lambda_role,
            "lambda.amazonaws.com",
            &["service-role/AWSLambdaBasicExecutionRole"],
            &lambda_statements,
        ));

        let common_env = json!({
            "OMICS_ROLE": role_arn(env, &omics_role),
            "OUTPUT_S3_LOCATION": output_location,
            "ECR_REGISTRY": ecr_registry(env),
            "JOB_TIMEOUT": config.job_timeout_seconds.to_string(),
            "REQUIREMENTS_FILE": config.requirements_file_path.display().to_string(),
            "LOG_LEVEL": "INFO",
        });

        let mut initial_env = common_env.clone();
        initial_env["WORKFLOW_ID"] = json!(self.settings.ready2run_workflow_id);

        let mut post_env = common_env;
        post_env["UPSTREAM_WORKFLOW_ID"] = json!(self.settings.ready2run_workflow_id);
        post_env["SPECIES"] = json!("homo_sapiens");
        post_env["DIR_CACHE"] = json!(format!(
            "s3://aws-genomics-static-{region}/omics-tutorials/data/databases/vep/"
        ));
        post_env["CACHE_VERSION"] = json!("110");
        post_env["GENOME"] = json!("GRCh38");

        for (function, handler, asset, variables) in [
            (
                &initial_fn,
                "initial_workflow_lambda_handler.handler",
                "lambda_function/initial_workflow_lambda",
                initial_env,
            ),
            (
                &post_fn,
                "post_initial_workflow_lambda_handler.handler",
                "lambda_function/post_initial_workflow_lambda",
                post_env,
            ),
        ] {
            resources.push(Resource::new(
                function.as_str(),
                ResourceKind::Function,
                json!({
                    "FunctionName": function,
                    "Runtime": FUNCTION_RUNTIME,
                    "Handler": handler,
                    "Code": { "Asset": asset },
                    "Role": role_arn(env, &lambda_role),
                    "Timeout": FUNCTION_TIMEOUT_SECONDS,
                    "RetryAttempts": 1,
                    "Environment": { "Variables": variables },
                }),
            ));
        }

        // S3 may only notify a function that has granted it invoke rights.
        resources.push(Resource::new(
            self.name("_initial_workflow_invoke_permission"),
            ResourceKind::Permission,
            json!({
                "Action": "lambda:InvokeFunction",
                "FunctionName": { "Fn::GetAtt": [initial_fn, "Arn"] },
                "Principal": "s3.amazonaws.com",
                "SourceAccount": env.account(),
                "SourceArn": bucket_arn(&input),
            }),
        ));
        resources.push(Resource::new(
            self.name("_initial_workflow_trigger"),
            ResourceKind::BucketNotification,
            json!({
                "BucketName": { "Ref": input },
                "NotificationConfiguration": {
                    "LambdaFunctionConfigurations": [{
                        "Events": ["s3:ObjectCreated:*"],
                        "LambdaFunctionArn": { "Fn::GetAtt": [initial_fn, "Arn"] },
                        "Filter": {
                            "Key": {
                                "FilterRules": [
                                    { "Name": "prefix", "Value": "fastqs/" },
                                    { "Name": "suffix", "Value": ".csv" },
                                ],
                            },
                        },
                    }],
                },
            }),
        ));

        resources.push(status_rule(
            &self.name("_rule_second_workflow_lambda"),
            "COMPLETED",
            json!({ "Arn": { "Fn::GetAtt": [post_fn, "Arn"] } }),
        ));

        resources.push(Resource::new(
            self.name("_workflow_queue"),
            ResourceKind::Queue,
            json!({
                "QueueName": self.name("_workflow_queue"),
                "VisibilityTimeout": config.message_visibility_timeout_seconds,
                "ReceiveMessageWaitTimeSeconds": config.queue_polling_frequency_seconds,
            }),
        ));

        debug!(stack = id, resources = resources.len(), "constructed stack plan");

        Ok(StackDefinition {
            id: id.to_string(),
            environment,
            config,
            resources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construct() -> StackDefinition {
        OmicsWorkflowStack::new(AppSettings::default())
            .construct(
                "omics-eventbridge-solution",
                TargetEnvironment::new("123456789012", "eu-west-1").unwrap(),
                DeploymentConfiguration::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_bucket_names_include_account_and_region() {
        let stack = construct();
        assert!(stack
            .resource("healthomics-cka-input-123456789012-eu-west-1")
            .is_some());
        assert!(stack
            .resource("healthomics-cka-output-123456789012-eu-west-1")
            .is_some());
        assert_eq!(
            stack.resource("SolutionBucket").unwrap().properties["BucketName"],
            "omics-eventbridge-solution-dev"
        );
        assert_eq!(stack.count(ResourceKind::Bucket), 3);
    }

    #[test]
    fn test_single_topic_with_failure_rule() {
        let stack = construct();
        assert_eq!(stack.count(ResourceKind::Topic), 1);

        let rule = stack
            .resource("healthomics_rule_workflow_status_topic")
            .unwrap();
        assert_eq!(rule.properties["EventPattern"]["detail"]["status"][0], "FAILED");
        assert_eq!(
            rule.properties["Targets"][0]["Arn"]["Ref"],
            "healthomics_workflow_status_topic"
        );

        assert_eq!(stack.count(ResourceKind::TopicPolicy), 1);
        let policy = stack
            .resource("healthomics_workflow_status_topic_policy")
            .unwrap();
        assert_eq!(
            policy.properties["Topics"][0]["Ref"],
            "healthomics_workflow_status_topic"
        );
        let statement = &policy.properties["PolicyDocument"]["Statement"][0];
        assert_eq!(statement["Principal"]["Service"], "events.amazonaws.com");
        assert_eq!(statement["Action"], "sns:Publish");

        let template = stack.to_template().to_string();
        assert!(template.contains("AWS::SNS::TopicPolicy"));
    }

    #[test]
    fn test_input_bucket_notifies_initial_function() {
        let stack = construct();
        assert_eq!(stack.count(ResourceKind::BucketNotification), 1);

        let trigger = stack.resource("healthomics_initial_workflow_trigger").unwrap();
        assert_eq!(
            trigger.properties["BucketName"]["Ref"],
            "healthomics-cka-input-123456789012-eu-west-1"
        );
        let config = &trigger.properties["NotificationConfiguration"]["LambdaFunctionConfigurations"][0];
        assert_eq!(
            config["LambdaFunctionArn"]["Fn::GetAtt"][0],
            "healthomics_initial_workflow_lambda"
        );
        assert_eq!(
            config["Filter"]["Key"]["FilterRules"],
            json!([
                { "Name": "prefix", "Value": "fastqs/" },
                { "Name": "suffix", "Value": ".csv" },
            ])
        );

        let permission = stack
            .resource("healthomics_initial_workflow_invoke_permission")
            .unwrap();
        assert_eq!(permission.kind, ResourceKind::Permission);
        assert_eq!(permission.properties["Principal"], "s3.amazonaws.com");
        assert_eq!(
            permission.properties["SourceArn"],
            "arn:aws:s3:::healthomics-cka-input-123456789012-eu-west-1"
        );
    }

    #[test]
    fn test_completed_rule_targets_post_initial_function() {
        let stack = construct();
        let rule = stack.resource("healthomics_rule_second_workflow_lambda").unwrap();
        assert_eq!(rule.properties["EventPattern"]["source"][0], "aws.omics");
        assert_eq!(
            rule.properties["EventPattern"]["detail"]["status"][0],
            "COMPLETED"
        );
        assert_eq!(
            rule.properties["Targets"][0]["Arn"]["Fn::GetAtt"][0],
            "healthomics_post_initial_workflow_lambda"
        );
    }

    #[test]
    fn test_roles_assumed_by_services() {
        let stack = construct();
        let principals: Vec<_> = stack
            .resources_of(ResourceKind::Role)
            .map(|r| {
                r.properties["AssumeRolePolicyDocument"]["Statement"][0]["Principal"]["Service"]
                    .clone()
            })
            .collect();
        assert_eq!(
            principals,
            vec![json!("omics.amazonaws.com"), json!("lambda.amazonaws.com")]
        );
    }

    #[test]
    fn test_functions_carry_workflow_settings() {
        let stack = construct();
        assert_eq!(stack.count(ResourceKind::Function), 2);

        let initial = stack.resource("healthomics_initial_workflow_lambda").unwrap();
        let vars = &initial.properties["Environment"]["Variables"];
        assert_eq!(vars["WORKFLOW_ID"], "9500764");
        assert_eq!(vars["JOB_TIMEOUT"], "1500");
        assert_eq!(vars["ECR_REGISTRY"], "123456789012.dkr.ecr.eu-west-1.amazonaws.com");
        assert_eq!(
            vars["OUTPUT_S3_LOCATION"],
            "s3://healthomics-cka-output-123456789012-eu-west-1/outputs"
        );
        assert_eq!(initial.properties["Timeout"], 60);

        let post = stack
            .resource("healthomics_post_initial_workflow_lambda")
            .unwrap();
        assert_eq!(
            post.properties["Environment"]["Variables"]["UPSTREAM_WORKFLOW_ID"],
            "9500764"
        );
    }

    #[test]
    fn test_queue_uses_deployment_timeouts() {
        let stack = construct();
        let queue = stack.resource("healthomics_workflow_queue").unwrap();
        assert_eq!(queue.properties["VisibilityTimeout"], 1200);
        assert_eq!(queue.properties["ReceiveMessageWaitTimeSeconds"], 20);
    }

    #[test]
    fn test_custom_app_name_prefixes_resources() {
        let settings = AppSettings {
            app_name: "genomics".to_string(),
            ..AppSettings::default()
        };
        let stack = OmicsWorkflowStack::new(settings)
            .construct(
                "id",
                TargetEnvironment::new("1", "us-east-1").unwrap(),
                DeploymentConfiguration::default(),
            )
            .unwrap();
        assert!(stack.resource("genomics_workflow_status_topic").is_some());
        assert!(stack.resource("genomics-cka-input-1-us-east-1").is_some());
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = OmicsWorkflowStack::new(AppSettings::default()).construct(
            " ",
            TargetEnvironment::new("1", "us-east-1").unwrap(),
            DeploymentConfiguration::default(),
        );
        assert!(matches!(result, Err(Error::Synth(_))));
    }
}
