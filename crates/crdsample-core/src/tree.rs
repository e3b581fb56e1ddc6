//! Property tree builder
//!
//! Describes a schema's structure for presentation: one descriptor per field
//! with type, constraints and requiredness, children nested the same way the
//! sample document nests them.

use serde::Serialize;

use crate::emitter::SampleGenerator;
use crate::error::Result;
use crate::options::GenerateOptions;
use crate::schema::{CrdSchema, RootSchema};
use crate::walker::{ResolvedField, SchemaWalker};

/// Display-ready description of one schema field
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Raw JSON of the declared default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDescriptor>,
}

impl PropertyDescriptor {
    /// Describe a walked field and its children
    pub fn from_field(field: &ResolvedField<'_>) -> Self {
        let schema = field.schema;
        Self {
            name: field.name.clone(),
            description: schema.description.clone().unwrap_or_default(),
            type_: schema.type_.to_string(),
            nullable: schema.nullable,
            pattern: schema.pattern.clone(),
            format: schema.format.clone(),
            default: schema.default.as_ref().map(ToString::to_string),
            required: field.required,
            properties: describe(field.children()),
        }
    }

    /// Whether this descriptor has nested descriptors
    #[cfg(test)]
    pub(crate) fn has_children(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Find a descendant by dot-separated path
    #[cfg(test)]
    pub(crate) fn find(&self, path: &str) -> Option<&PropertyDescriptor> {
        let mut current = self;
        for part in path.split('.') {
            current = current.properties.iter().find(|p| p.name == part)?;
        }
        Some(current)
    }
}

/// Describe a list of walked fields, keeping their order
pub fn describe(fields: &[ResolvedField<'_>]) -> Vec<PropertyDescriptor> {
    fields.iter().map(PropertyDescriptor::from_field).collect()
}

/// Build the property tree of a version's root schema
pub fn build_property_tree(
    schema: &RootSchema,
    options: &GenerateOptions,
) -> Result<Vec<PropertyDescriptor>> {
    // Samples are not part of the tree, so skip the pattern work
    let options = options.clone().with_skip_random(true);
    let fields = SchemaWalker::with_identity("", "", &options)
        .with_sentinel_children()
        .walk(schema)?;
    Ok(describe(&fields))
}

/// One CRD version with both of its renderings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: String,
    pub kind: String,
    pub group: String,
    /// `group/version`
    pub api_version: String,
    pub description: String,
    pub properties: Vec<PropertyDescriptor>,
    pub yaml: String,
}

/// Walk every version once and render both the property tree and the sample
pub fn build_version_records(
    crd: &CrdSchema,
    options: &GenerateOptions,
) -> Result<Vec<VersionRecord>> {
    let generator = SampleGenerator::new(options.clone());
    let mut records = Vec::with_capacity(crd.versions.len());

    for version in &crd.versions {
        let (properties, yaml) = match &version.schema {
            Some(schema) => {
                let fields = SchemaWalker::new(crd, &version.name, options)
                    .with_sentinel_children()
                    .walk(schema)?;
                let mut yaml = Vec::new();
                generator.render(&fields, &mut yaml)?;
                (describe(&fields), String::from_utf8_lossy(&yaml).into_owned())
            }
            None => (Vec::new(), String::new()),
        };

        records.push(VersionRecord {
            version: version.name.clone(),
            kind: crd.kind.clone(),
            group: crd.group.clone(),
            api_version: crd.api_version(&version.name),
            description: version.description().unwrap_or_default().to_string(),
            properties,
            yaml,
        });
    }

    Ok(records)
}
