#![deny(missing_docs)]

//! # RAML Core
//!
//! Core library for generating RAML 1.0 API descriptions from Serverless
//! service manifests.

/// Shared error types.
pub mod error;

/// Service manifest model and loading.
pub mod manifest;

/// Service endpoint discovery from stack outputs.
pub mod endpoint;

/// RAML document assembly and rendering.
pub mod raml;

pub use endpoint::{
    resolve_endpoint, resolve_endpoint_with_timeout, DescribeStacksOutput, InfrastructureQuery,
    ServerlessNaming, Stack, StackNaming, StackOutput,
};
pub use error::{AppError, AppResult};
pub use manifest::{
    load_manifest, FunctionDeclaration, ManifestSource, ServiceManifest, TriggerDeclaration,
};
pub use raml::{build_spec, generate_raml, SpecDocument, RAML_HEADER};
