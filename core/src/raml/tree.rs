#![deny(missing_docs)]

//! # Resource Tree
//!
//! Mutable cursor over the nested mappings that make up a RAML resource tree.
//! Resource nodes are keyed `"/segment"`, method leaves by the raw HTTP verb.

use serde_yaml::{Mapping, Value};

/// A mutable handle on one mapping of the document tree.
#[derive(Debug)]
pub struct ResourceNode<'a> {
    map: &'a mut Mapping,
}

impl<'a> ResourceNode<'a> {
    /// Wraps a mapping, usually the document root.
    pub fn new(map: &'a mut Mapping) -> Self {
        Self { map }
    }

    /// Descends into the child stored under `key`, creating it when missing.
    ///
    /// An existing mapping is reused as-is, so triggers sharing a path prefix
    /// share the node. Any other value under `key` is replaced by an empty mapping.
    pub fn get_or_create_child(self, key: &str) -> ResourceNode<'a> {
        let map = self.map;
        let slot = map
            .entry(Value::String(key.to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        ResourceNode {
            map: ensure_mapping(slot),
        }
    }

    /// Walks `segments` left to right, keying each child `"/" + segment`.
    pub fn descend<'s, I>(self, segments: I) -> ResourceNode<'a>
    where
        I: IntoIterator<Item = &'s str>,
    {
        segments
            .into_iter()
            .fold(self, |node, segment| node.get_or_create_child(&format!("/{}", segment)))
    }

    /// Sets the method leaf, overwriting an earlier fragment for the same method.
    pub fn set_method(&mut self, method: &str, fragment: Option<Value>) {
        self.map.insert(
            Value::String(method.to_string()),
            fragment.unwrap_or_else(|| Value::Mapping(Mapping::new())),
        );
    }
}

fn ensure_mapping(slot: &mut Value) -> &mut Mapping {
    match slot {
        Value::Mapping(map) => map,
        _ => {
            *slot = Value::Mapping(Mapping::new());
            ensure_mapping(slot)
        }
    }
}
