#![deny(missing_docs)]

//! # RAML Command
//!
//! Implements the pipeline: manifest -> endpoint lookup -> RAML document -> output.
//!
//! 1. **Manifest**: Reads `serverless.yml` (or `--config`).
//! 2. **Endpoint**: Asks CloudFormation for the `ServiceEndpoint` output. Any failure
//!    only means the document has no `baseUri`.
//! 3. **Document**: Builds and renders the RAML tree.
//! 4. **Output**: Prints to stdout or writes `--output`.

use crate::aws::AwsCliProvider;
use crate::executor::CommandExecutor;
use raml_core::{
    generate_raml, load_manifest, resolve_endpoint_with_timeout, AppError, AppResult,
    InfrastructureQuery, ServerlessNaming, ServiceManifest,
};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the raml command.
#[derive(clap::Args, Debug, Clone)]
pub struct RamlArgs {
    /// Path to the service manifest.
    #[clap(long, short = 'c', default_value = "serverless.yml")]
    pub config: PathBuf,

    /// Deployment stage (defaults to `provider.stage`, then `dev`).
    #[clap(long, short = 's', env = "SLS_STAGE")]
    pub stage: Option<String>,

    /// Deployment region (defaults to `provider.region`, then `us-east-1`).
    #[clap(long, short = 'r', env = "SLS_REGION")]
    pub region: Option<String>,

    /// AWS credentials profile (defaults to `provider.profile`).
    #[clap(long, env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,

    /// Write the document to this file instead of stdout.
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Skip the remote endpoint lookup; `baseUri` then only comes from the manifest.
    #[clap(long)]
    pub no_lookup: bool,

    /// Seconds to wait for the endpoint lookup before giving up.
    #[clap(long, default_value_t = 30)]
    pub lookup_timeout: u64,
}

/// Runs the raml command against the `aws` command line.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `executor` - Runs the `aws` program (use `ShellExecutor` for real execution).
pub async fn run<E: CommandExecutor>(args: &RamlArgs, executor: E) -> AppResult<()> {
    let manifest = load_manifest(&args.config)?;
    let provider = AwsCliProvider::new(executor).with_profile(aws_profile(args, &manifest));
    execute(args, &manifest, &provider).await
}

/// Executes the raml command for an already loaded manifest.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `manifest` - The parsed service manifest.
/// * `query` - The infrastructure backend used to find the deployed endpoint.
pub async fn execute(
    args: &RamlArgs,
    manifest: &ServiceManifest,
    query: &dyn InfrastructureQuery,
) -> AppResult<()> {
    let endpoint = lookup_endpoint(args, manifest, query).await;
    let raml = generate_raml(manifest, endpoint.as_deref())?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::General(format!("Failed to create output dir: {}", e))
                })?;
            }
            fs::write(path, &raml)
                .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", path, e)))?;
            tracing::info!(path = %path.display(), "wrote RAML document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(raml.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// `--aws-profile` wins over `provider.profile`.
fn aws_profile(args: &RamlArgs, manifest: &ServiceManifest) -> Option<String> {
    args.aws_profile
        .clone()
        .or_else(|| manifest.provider.profile.clone())
}

async fn lookup_endpoint(
    args: &RamlArgs,
    manifest: &ServiceManifest,
    query: &dyn InfrastructureQuery,
) -> Option<String> {
    if args.no_lookup {
        tracing::debug!("endpoint lookup disabled");
        return None;
    }
    let Some(service) = manifest.service_name() else {
        tracing::warn!("manifest has no service name; skipping endpoint lookup");
        return None;
    };

    let stage = manifest.stage(args.stage.as_deref());
    let region = manifest.region(args.region.as_deref());
    let naming = ServerlessNaming::new(service);

    let endpoint = resolve_endpoint_with_timeout(
        query,
        &naming,
        &stage,
        &region,
        Duration::from_secs(args.lookup_timeout),
    )
    .await;

    match &endpoint {
        Some(url) => tracing::info!(%url, %stage, %region, "resolved service endpoint"),
        None => tracing::info!(%stage, %region, "no service endpoint found; omitting baseUri"),
    }
    endpoint
}
