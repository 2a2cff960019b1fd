#![deny(missing_docs)]

//! # AWS Stack Lookup
//!
//! [`InfrastructureQuery`] backed by the `aws` command line:
//!
//! `aws cloudformation describe-stacks --stack-name <name> --region <region> --output json`
//!
//! The JSON printed on stdout decodes straight into [`DescribeStacksOutput`].

use crate::error::CliError;
use crate::executor::CommandExecutor;
use async_trait::async_trait;
use raml_core::{AppError, AppResult, DescribeStacksOutput, InfrastructureQuery};

/// Queries CloudFormation through the `aws` program.
#[derive(Debug, Clone)]
pub struct AwsCliProvider<E> {
    executor: E,
    program: String,
    profile: Option<String>,
}

impl<E: CommandExecutor> AwsCliProvider<E> {
    /// Creates a provider running `aws` through `executor`.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            program: "aws".to_string(),
            profile: None,
        }
    }

    /// Uses a named credentials profile.
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    fn describe_stacks_args(&self, stack_name: &str, region: &str) -> Vec<String> {
        let mut args = vec![
            "cloudformation".to_string(),
            "describe-stacks".to_string(),
            "--stack-name".to_string(),
            stack_name.to_string(),
            "--region".to_string(),
            region.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args
    }
}

#[async_trait]
impl<E: CommandExecutor> InfrastructureQuery for AwsCliProvider<E> {
    async fn describe_stacks(
        &self,
        stack_name: &str,
        stage: &str,
        region: &str,
    ) -> AppResult<DescribeStacksOutput> {
        tracing::debug!(stack_name, stage, region, "describing stack");
        let args = self.describe_stacks_args(stack_name, region);
        let output = self.executor.execute(&self.program, &args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CliError::Command(format!(
                "{} exited with status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ))
            .into());
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| AppError::Provider(format!("Unexpected describe-stacks output: {}", e)))
    }
}
