#![deny(missing_docs)]

//! # Service Manifest
//!
//! Deserializes the parts of a `serverless.yml` that matter for documentation:
//! service name, provider stage/region, the ordered function table with their
//! events, and the `custom.documentation.raml` seed mapping.
//!
//! Only `http` events are interpreted. Any other event kind
//! (`schedule`, `sns`, `s3`, ...) is accepted and ignored.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Stage used when neither the caller nor the manifest selects one.
pub const DEFAULT_STAGE: &str = "dev";

/// Region used when neither the caller nor the manifest selects one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Read access to a service manifest.
///
/// The document builder only talks to this trait so that manifests can come from
/// somewhere other than a YAML file (tests, embedding tools).
pub trait ManifestSource {
    /// Names of all declared functions, in declaration order.
    fn function_names(&self) -> Vec<&str>;

    /// Looks up a function declaration by name.
    fn function(&self, name: &str) -> Option<&FunctionDeclaration>;

    /// The user supplied top-level documentation mapping, if any.
    fn documentation(&self) -> Option<&Mapping>;
}

/// A parsed `serverless.yml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceManifest {
    /// Service name, either `service: name` or `service: { name: ... }`.
    #[serde(default)]
    pub service: Option<ServiceName>,

    /// Provider block (stage and region defaults live here).
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: ProviderSettings,

    /// Function table, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub functions: IndexMap<String, FunctionDeclaration>,

    /// The `custom` block; only `documentation.raml` is read.
    #[serde(default)]
    pub custom: Option<CustomSettings>,
}

/// The two spellings of the service name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServiceName {
    /// `service: users-api`
    Plain(String),
    /// `service: { name: users-api }`
    Detailed {
        /// The service name.
        name: String,
    },
}

/// Subset of the `provider` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderSettings {
    /// Default deployment stage.
    pub stage: Option<String>,
    /// Default deployment region.
    pub region: Option<String>,
    /// Credentials profile used for remote lookups.
    pub profile: Option<String>,
}

/// Subset of the `custom` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomSettings {
    /// `custom.documentation`
    pub documentation: Option<DocumentationSettings>,
}

/// `custom.documentation`; other documentation plugins may share this key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentationSettings {
    /// Seed mapping for the generated RAML document.
    pub raml: Option<Mapping>,
}

/// One entry of the `functions` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FunctionDeclaration {
    /// Events invoking the function.
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventDeclaration>,
}

/// A single event entry. Unknown event kinds deserialize with `http: None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventDeclaration {
    /// The `http` trigger, when this event is one.
    pub http: Option<HttpEvent>,
}

/// The `http` event value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HttpEvent {
    /// `http: GET users/{id}`
    Shorthand(String),
    /// `http: { path: ..., method: ..., documentation: { raml: ... } }`
    Detailed(HttpEventDetails),
}

/// Detailed form of an `http` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HttpEventDetails {
    /// Slash delimited resource path.
    pub path: Option<String>,
    /// HTTP verb, kept exactly as written.
    pub method: Option<String>,
    /// Per-trigger documentation. Only a mapping's `raml` entry is read;
    /// any other shape belongs to some other tool and is ignored.
    pub documentation: Option<Value>,
}

/// An HTTP entry point, validated and ready for the document builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDeclaration {
    /// Slash delimited resource path (may be `/`).
    pub path: String,
    /// HTTP verb as declared.
    pub method: String,
    /// Optional documentation fragment.
    pub documentation: Option<Value>,
}

impl FunctionDeclaration {
    /// Returns the HTTP triggers of this function in declaration order.
    ///
    /// # Arguments
    ///
    /// * `function` - The function's name, used in error messages.
    ///
    /// # Errors
    ///
    /// `AppError::MalformedTrigger` if an `http` event lacks a path or a method.
    pub fn http_triggers(&self, function: &str) -> AppResult<Vec<TriggerDeclaration>> {
        self.events
            .iter()
            .filter_map(|event| event.http.as_ref())
            .map(|http| http.to_trigger(function))
            .collect()
    }
}

impl HttpEvent {
    fn to_trigger(&self, function: &str) -> AppResult<TriggerDeclaration> {
        let malformed = |reason: &str| AppError::MalformedTrigger {
            function: function.to_string(),
            reason: reason.to_string(),
        };

        match self {
            HttpEvent::Shorthand(text) => {
                let mut parts = text.split_whitespace();
                let method = parts
                    .next()
                    .ok_or_else(|| malformed("http event is empty"))?;
                let path = parts
                    .next()
                    .ok_or_else(|| malformed("http shorthand has no path"))?;
                if parts.next().is_some() {
                    return Err(malformed("http shorthand must be '<method> <path>'"));
                }
                Ok(TriggerDeclaration {
                    path: path.to_string(),
                    method: method.to_string(),
                    documentation: None,
                })
            }
            HttpEvent::Detailed(details) => {
                let path = details
                    .path
                    .clone()
                    .ok_or_else(|| malformed("http event has no path"))?;
                let method = details
                    .method
                    .clone()
                    .filter(|m| !m.is_empty())
                    .ok_or_else(|| malformed("http event has no method"))?;
                Ok(TriggerDeclaration {
                    path,
                    method,
                    documentation: details
                        .documentation
                        .as_ref()
                        .and_then(Value::as_mapping)
                        .and_then(|doc| doc.get("raml"))
                        .cloned(),
                })
            }
        }
    }
}

impl ServiceManifest {
    /// Parses a manifest from YAML text.
    pub fn from_yaml(yaml_content: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| AppError::Manifest(format!("Failed to parse manifest YAML: {}", e)))
    }

    /// The declared service name, if any.
    pub fn service_name(&self) -> Option<&str> {
        match self.service.as_ref()? {
            ServiceName::Plain(name) => Some(name.as_str()),
            ServiceName::Detailed { name } => Some(name.as_str()),
        }
    }

    /// Effective stage: explicit selection, then `provider.stage`, then `dev`.
    pub fn stage(&self, selected: Option<&str>) -> String {
        selected
            .or(self.provider.stage.as_deref())
            .unwrap_or(DEFAULT_STAGE)
            .to_string()
    }

    /// Effective region: explicit selection, then `provider.region`, then `us-east-1`.
    pub fn region(&self, selected: Option<&str>) -> String {
        selected
            .or(self.provider.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }
}

impl ManifestSource for ServiceManifest {
    fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions.get(name)
    }

    fn documentation(&self) -> Option<&Mapping> {
        self.custom
            .as_ref()?
            .documentation
            .as_ref()?
            .raml
            .as_ref()
    }
}

/// Reads and parses the manifest at `path`.
pub fn load_manifest(path: &Path) -> AppResult<ServiceManifest> {
    tracing::debug!(path = %path.display(), "loading service manifest");
    let content = fs::read_to_string(path)?;
    let manifest = ServiceManifest::from_yaml(&content)?;
    tracing::debug!(
        functions = manifest.functions.len(),
        service = manifest.service_name().unwrap_or("<unnamed>"),
        "manifest loaded"
    );
    Ok(manifest)
}

/// Treats an explicit YAML `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
service: users-api
provider:
  name: aws
  stage: prod
  region: eu-west-1
custom:
  documentation:
    raml:
      title: Users
functions:
  list:
    handler: handler.list
    events:
      - http:
          path: /users
          method: get
          documentation:
            raml:
              description: List users
      - schedule: rate(5 minutes)
  create:
    handler: handler.create
    events:
      - http: POST users
  cron:
    handler: handler.cron
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ServiceManifest::from_yaml(MANIFEST).unwrap();

        assert_eq!(manifest.service_name(), Some("users-api"));
        assert_eq!(manifest.function_names(), vec!["list", "create", "cron"]);

        let docs = manifest.documentation().unwrap();
        assert_eq!(docs.get("title"), Some(&Value::from("Users")));
    }

    #[test]
    fn test_http_triggers_skip_other_events() {
        let manifest = ServiceManifest::from_yaml(MANIFEST).unwrap();
        let triggers = manifest
            .function("list")
            .unwrap()
            .http_triggers("list")
            .unwrap();

        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].path, "/users");
        assert_eq!(triggers[0].method, "get");
        let doc = triggers[0].documentation.as_ref().unwrap();
        assert_eq!(doc.get("description"), Some(&Value::from("List users")));
    }

    #[test]
    fn test_shorthand_keeps_method_case() {
        let manifest = ServiceManifest::from_yaml(MANIFEST).unwrap();
        let triggers = manifest
            .function("create")
            .unwrap()
            .http_triggers("create")
            .unwrap();

        assert_eq!(
            triggers,
            vec![TriggerDeclaration {
                path: "users".into(),
                method: "POST".into(),
                documentation: None,
            }]
        );
    }

    #[test]
    fn test_function_without_events() {
        let manifest = ServiceManifest::from_yaml(MANIFEST).unwrap();
        let triggers = manifest
            .function("cron")
            .unwrap()
            .http_triggers("cron")
            .unwrap();
        assert!(triggers.is_empty());
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let yaml = r#"
functions:
  broken:
    events:
      - http:
          method: get
"#;
        let manifest = ServiceManifest::from_yaml(yaml).unwrap();
        let err = manifest
            .function("broken")
            .unwrap()
            .http_triggers("broken")
            .unwrap_err();
        match err {
            AppError::MalformedTrigger { function, reason } => {
                assert_eq!(function, "broken");
                assert!(reason.contains("no path"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_foreign_trigger_documentation_is_ignored() {
        let yaml = r#"
functions:
  wiki:
    events:
      - http:
          path: /wiki
          method: get
          documentation: see the team wiki
"#;
        let manifest = ServiceManifest::from_yaml(yaml).unwrap();
        let triggers = manifest
            .function("wiki")
            .unwrap()
            .http_triggers("wiki")
            .unwrap();

        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].path, "/wiki");
        assert!(triggers[0].documentation.is_none());
    }

    #[test]
    fn test_trigger_documentation_without_raml_key() {
        let yaml = "functions:\n  f:\n    events:\n      - http: { path: /a, method: get, documentation: { summary: other plugin } }\n";
        let manifest = ServiceManifest::from_yaml(yaml).unwrap();
        let triggers = manifest.function("f").unwrap().http_triggers("f").unwrap();
        assert!(triggers[0].documentation.is_none());
    }

    #[test]
    fn test_shorthand_without_path_is_rejected() {
        let event = HttpEvent::Shorthand("GET".into());
        assert!(event.to_trigger("f").is_err());
    }

    #[test]
    fn test_null_sections() {
        let yaml = "service:\n  name: svc\nprovider:\nfunctions:\n";
        let manifest = ServiceManifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.service_name(), Some("svc"));
        assert!(manifest.functions.is_empty());
        assert!(manifest.documentation().is_none());
    }

    #[test]
    fn test_stage_and_region_precedence() {
        let manifest = ServiceManifest::from_yaml(MANIFEST).unwrap();
        assert_eq!(manifest.stage(None), "prod");
        assert_eq!(manifest.stage(Some("qa")), "qa");
        assert_eq!(manifest.region(None), "eu-west-1");

        let empty = ServiceManifest::default();
        assert_eq!(empty.stage(None), DEFAULT_STAGE);
        assert_eq!(empty.region(None), DEFAULT_REGION);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ServiceManifest::from_yaml("functions: [").unwrap_err();
        assert!(matches!(err, AppError::Manifest(_)));
    }

    #[test]
    fn test_load_manifest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.functions.len(), 3);
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("serverless.yml")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
