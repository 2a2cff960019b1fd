#![deny(missing_docs)]

//! # Command Execution
//!
//! Runs external programs (the `aws` command line) on behalf of the CLI.
//!
//! Abstracted behind [`CommandExecutor`] so tests can capture invocations
//! without the real tool installed.

use crate::error::CliResult;
use async_trait::async_trait;
use std::process::Output;
use tokio::process::Command;

/// Interface for executing an external command.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Executes the command and returns its captured output.
    async fn execute(&self, program: &str, args: &[String]) -> CliResult<Output>;
}

/// Standard executor using `tokio::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> CliResult<Output> {
        tracing::debug!(program, ?args, "spawning command");
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(output)
    }
}
