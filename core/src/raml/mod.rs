#![deny(missing_docs)]

//! # RAML Generation Module
//!
//! - **tree**: get-or-create navigation over nested YAML mappings.
//! - **builder**: seed/default handling, trigger placement and rendering.

pub mod builder;
pub mod tree;

pub use builder::{build_spec, generate_raml, SpecDocument, RAML_HEADER};
pub use tree::ResourceNode;
