#![deny(missing_docs)]

//! # sls-raml
//!
//! Prints a RAML 1.0 description of a Serverless service's HTTP API.
//!
//! Supported Commands:
//! - `raml`: Manifest + deployed stack outputs -> RAML document.

use clap::{Parser, Subcommand};
use raml_core::AppResult;

use crate::executor::ShellExecutor;

mod aws;
mod error;
mod executor;
mod logging;
mod raml;

#[derive(Parser, Debug)]
#[clap(author, version, about = "RAML generator for Serverless services")]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[clap(long, short = 'v', global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the RAML document for the service.
    Raml(raml::RamlArgs),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Raml(args) => {
            // Injecting the aws command line backend
            raml::run(args, ShellExecutor).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_raml_flags() {
        let cli = Cli::try_parse_from([
            "sls-raml",
            "raml",
            "--config",
            "api/serverless.yml",
            "-s",
            "prod",
            "-r",
            "eu-central-1",
            "--no-lookup",
        ])
        .unwrap();

        let Commands::Raml(args) = cli.command;
        assert_eq!(args.config, std::path::PathBuf::from("api/serverless.yml"));
        assert_eq!(args.stage.as_deref(), Some("prod"));
        assert_eq!(args.region.as_deref(), Some("eu-central-1"));
        assert!(args.no_lookup);
        assert_eq!(args.lookup_timeout, 30);
    }
}
