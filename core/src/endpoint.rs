#![deny(missing_docs)]

//! # Endpoint Resolution
//!
//! Best-effort discovery of the service's public base URL from the deployed
//! CloudFormation stack outputs.
//!
//! The query backend is injected through [`InfrastructureQuery`] and the naming
//! conventions through [`StackNaming`]. Resolution returns `Option<String>`:
//! every failure collapses to `None` here and nothing is logged or retried.

use crate::error::AppResult;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

/// Pattern matching the stack output that carries the API Gateway endpoint.
pub const SERVICE_ENDPOINT_PATTERN: &str = "^ServiceEndpoint";

/// Naming conventions used to locate a service's stack and its endpoint output.
pub trait StackNaming {
    /// Derives the infrastructure stack name for a stage.
    fn stack_name(&self, stage: &str) -> String;

    /// Pattern identifying the output that holds the public endpoint.
    fn service_endpoint_pattern(&self) -> Regex;
}

/// The Serverless framework conventions: `{service}-{stage}` and `^ServiceEndpoint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerlessNaming {
    service: String,
}

impl ServerlessNaming {
    /// Creates the naming rules for a service.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl StackNaming for ServerlessNaming {
    fn stack_name(&self, stage: &str) -> String {
        format!("{}-{}", self.service, stage)
    }

    fn service_endpoint_pattern(&self) -> Regex {
        static ENDPOINT_RE: OnceLock<Regex> = OnceLock::new();
        ENDPOINT_RE
            .get_or_init(|| Regex::new(SERVICE_ENDPOINT_PATTERN).expect("Invalid regex constant"))
            .clone()
    }
}

/// Response of a "describe stacks" query, shaped like the CloudFormation JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DescribeStacksOutput {
    /// Matching stacks.
    #[serde(rename = "Stacks", default)]
    pub stacks: Vec<Stack>,
}

/// A deployed stack.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stack {
    /// Exported key/value outputs.
    #[serde(rename = "Outputs", default)]
    pub outputs: Vec<StackOutput>,
}

/// One stack output.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StackOutput {
    /// Output key, e.g. `ServiceEndpoint`.
    #[serde(rename = "OutputKey")]
    pub key: String,
    /// Output value, e.g. `https://abc.execute-api.us-east-1.amazonaws.com/dev`.
    #[serde(rename = "OutputValue")]
    pub value: String,
}

/// The remote infrastructure description service.
#[async_trait]
pub trait InfrastructureQuery: Send + Sync {
    /// Describes the named stack in the given stage and region.
    async fn describe_stacks(
        &self,
        stack_name: &str,
        stage: &str,
        region: &str,
    ) -> AppResult<DescribeStacksOutput>;
}

/// Looks up the service endpoint, returning `None` on any failure.
///
/// Only the first stack of the response is inspected. When several outputs
/// match the endpoint pattern, the first one in response order wins.
pub async fn resolve_endpoint<Q, N>(
    query: &Q,
    naming: &N,
    stage: &str,
    region: &str,
) -> Option<String>
where
    Q: InfrastructureQuery + ?Sized,
    N: StackNaming + ?Sized,
{
    let stack_name = naming.stack_name(stage);
    let response = query.describe_stacks(&stack_name, stage, region).await.ok()?;
    select_endpoint(&response, &naming.service_endpoint_pattern())
}

/// Same as [`resolve_endpoint`], but gives up after `timeout`.
pub async fn resolve_endpoint_with_timeout<Q, N>(
    query: &Q,
    naming: &N,
    stage: &str,
    region: &str,
    timeout: Duration,
) -> Option<String>
where
    Q: InfrastructureQuery + ?Sized,
    N: StackNaming + ?Sized,
{
    tokio::time::timeout(timeout, resolve_endpoint(query, naming, stage, region))
        .await
        .ok()
        .flatten()
}

fn select_endpoint(response: &DescribeStacksOutput, pattern: &Regex) -> Option<String> {
    response
        .stacks
        .first()?
        .outputs
        .iter()
        .find(|output| pattern.is_match(&output.key))
        .map(|output| output.value.clone())
}
