#![deny(missing_docs)]

//! # RAML Document Builder
//!
//! Turns a [`ManifestSource`] plus an optionally resolved endpoint into a
//! [`SpecDocument`], then renders it as `#%RAML 1.0` followed by a YAML body.
//!
//! The build is a pure function of its inputs. The seed mapping is cloned,
//! so repeated builds from the same manifest produce identical output.

use crate::error::{AppError, AppResult};
use crate::manifest::{ManifestSource, TriggerDeclaration};
use crate::raml::tree::ResourceNode;
use serde_yaml::{Mapping, Value};

/// First line of every RAML 1.0 document.
pub const RAML_HEADER: &str = "#%RAML 1.0";

/// Protocols written when the seed does not set `protocols`.
pub const DEFAULT_PROTOCOLS: &[&str] = &["HTTPS"];

/// Media type written when the seed does not set `mediaType`.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// The assembled RAML document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    root: Mapping,
}

impl SpecDocument {
    /// The root mapping.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Consumes the document, returning the root mapping.
    pub fn into_root(self) -> Mapping {
        self.root
    }

    /// Renders the header line followed by the block-style YAML body.
    pub fn render(&self) -> AppResult<String> {
        let body = serde_yaml::to_string(&self.root)
            .map_err(|e| AppError::Serialize(format!("Failed to dump RAML document: {}", e)))?;
        Ok(format!("{}\n{}", RAML_HEADER, body))
    }
}

/// Builds the document tree.
///
/// # Arguments
///
/// * `manifest` - Functions, triggers and the optional seed documentation.
/// * `endpoint` - The resolved service endpoint, used for `baseUri` when the seed has none.
///
/// # Errors
///
/// `AppError::MalformedTrigger` when an HTTP trigger lacks a path or a method.
pub fn build_spec(manifest: &impl ManifestSource, endpoint: Option<&str>) -> AppResult<SpecDocument> {
    let mut root = manifest.documentation().cloned().unwrap_or_default();

    if is_absent(&root, "protocols") {
        let protocols = DEFAULT_PROTOCOLS.iter().map(|p| Value::from(*p)).collect();
        root.insert(Value::from("protocols"), Value::Sequence(protocols));
    }
    if is_absent(&root, "mediaType") {
        root.insert(Value::from("mediaType"), Value::from(DEFAULT_MEDIA_TYPE));
    }
    if let Some(endpoint) = endpoint {
        if is_absent(&root, "baseUri") {
            root.insert(Value::from("baseUri"), Value::from(endpoint));
        }
    }

    for name in manifest.function_names() {
        let Some(function) = manifest.function(name) else {
            continue;
        };
        for trigger in function.http_triggers(name)? {
            tracing::trace!(function = name, path = %trigger.path, method = %trigger.method, "adding resource");
            place_trigger(&mut root, trigger);
        }
    }

    Ok(SpecDocument { root })
}

/// Builds and renders in one step.
pub fn generate_raml(manifest: &impl ManifestSource, endpoint: Option<&str>) -> AppResult<String> {
    build_spec(manifest, endpoint)?.render()
}

fn place_trigger(root: &mut Mapping, trigger: TriggerDeclaration) {
    let node = ResourceNode::new(root);
    let mut node = if trigger.path == "/" {
        node.get_or_create_child("/")
    } else {
        // No segments at all (`""`, `"//"`) leaves the method on the root.
        node.descend(trigger.path.split('/').filter(|s| !s.is_empty()))
    };
    node.set_method(&trigger.method, trigger.documentation);
}

fn is_absent(map: &Mapping, key: &str) -> bool {
    map.get(key).map_or(true, Value::is_null)
}
