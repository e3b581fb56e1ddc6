//! crdsample core - sample documents and property trees from Kubernetes CRDs
//!
//! This crate provides:
//! - `CrdParser`: Load CustomResourceDefinition manifests into `CrdSchema`
//! - `SchemaWalker`: One ordered, depth-first traversal of a version's schema
//! - `SampleGenerator`: Render the traversal as a sample YAML document
//! - `build_property_tree`: Render the traversal as `PropertyDescriptor`s
//! - `GenerateOptions`: Comments, required-only output, pattern sampling

pub mod emitter;
pub mod error;
pub mod options;
pub mod parser;
pub mod pattern;
pub mod schema;
pub mod tree;
pub mod value;
pub mod walker;

pub use emitter::{
    DOCUMENT_SEPARATOR, ROOT_REQUIRED_FIELDS, SampleGenerator, generate, generate_all,
};
pub use error::{Result, SampleError};
pub use options::{DEFAULT_MAX_DEPTH, GenerateOptions};
pub use parser::CrdParser;
pub use schema::{
    AdditionalProperties, CrdSchema, CrdVersion, Properties, PropertyType, RootSchema, SchemaNode,
};
pub use tree::{
    PropertyDescriptor, VersionRecord, build_property_tree, build_version_records, describe,
};
pub use value::ValueSynthesizer;
pub use walker::{FieldShape, ResolvedField, SchemaWalker};
