//! CRD schema model
//!
//! Read-only view of a CustomResourceDefinition: its identity and, per
//! version, the OpenAPI v3 subset that sample generation reads. Walkers borrow
//! these types and never mutate them, so one `CrdSchema` can feed any number
//! of generators.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Child nodes keyed by field name, iterated in lexicographic order
pub type Properties = BTreeMap<String, SchemaNode>;

/// A loaded CustomResourceDefinition
#[derive(Debug, Clone, PartialEq)]
pub struct CrdSchema {
    /// `metadata.name`, e.g. "widgets.example.com"
    pub name: String,
    pub group: String,
    /// `spec.names.kind`, written into the top-level `kind` of samples
    pub kind: String,
    /// Declaration order is kept; samples follow it
    pub versions: Vec<CrdVersion>,
}

impl CrdSchema {
    /// `group/version` as used for `apiVersion`
    pub fn api_version(&self, version: &str) -> String {
        format!("{}/{}", self.group, version)
    }
}

/// One entry of `spec.versions`
#[derive(Debug, Clone, PartialEq)]
pub struct CrdVersion {
    pub name: String,
    /// `None` when the version declares no `openAPIV3Schema`
    pub schema: Option<RootSchema>,
}

impl CrdVersion {
    pub fn new(name: impl Into<String>, schema: RootSchema) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.schema.as_ref()?.description.as_deref()
    }
}

/// The `openAPIV3Schema` of a version
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootSchema {
    pub description: Option<String>,
    pub properties: Properties,
    pub required: Vec<String>,
}

impl RootSchema {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            ..Default::default()
        }
    }
}

/// One node of an OpenAPI schema below the root
///
/// `required` lists names of this node's own children; it says nothing about
/// the node itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    pub type_: PropertyType,
    pub description: Option<String>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub enum_values: Option<Vec<Value>>,
    pub minimum: Option<f64>,
    pub min_items: Option<u64>,
    pub nullable: bool,
    pub properties: Option<Properties>,
    pub required: Option<Vec<String>>,
    pub items: Option<Box<SchemaNode>>,
    pub additional_properties: Option<AdditionalProperties>,
}

impl SchemaNode {
    fn typed(type_: PropertyType) -> Self {
        Self {
            type_,
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Self::typed(PropertyType::String)
    }

    pub fn integer() -> Self {
        Self::typed(PropertyType::Integer)
    }

    pub fn boolean() -> Self {
        Self::typed(PropertyType::Boolean)
    }

    /// Object node with the given children
    pub fn object(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
            ..Self::typed(PropertyType::Object)
        }
    }

    /// Array node whose items follow `items`
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed(PropertyType::Array)
        }
    }

    /// Object node whose arbitrary keys all map to `values`
    pub fn map(values: SchemaNode) -> Self {
        Self {
            additional_properties: Some(AdditionalProperties::Schema(Box::new(values))),
            ..Self::typed(PropertyType::Object)
        }
    }

    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(required.into_iter().map(Into::into).collect());
        self
    }

    /// Children, or `None` when there are none to walk
    pub fn nested(&self) -> Option<&Properties> {
        self.properties.as_ref().filter(|p| !p.is_empty())
    }

    pub fn has_nested_properties(&self) -> bool {
        self.nested().is_some()
    }

    pub fn required_fields(&self) -> &[String] {
        self.required.as_deref().unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn requires(&self, child: &str) -> bool {
        self.required_fields().iter().any(|r| r == child)
    }

    /// Item schema of an array of objects that declare properties
    pub fn object_items(&self) -> Option<&SchemaNode> {
        match self.type_ {
            PropertyType::Array => self.items.as_deref().filter(|i| i.has_nested_properties()),
            _ => None,
        }
    }

    /// Descendant at a dot-separated path through `properties`
    #[cfg(test)]
    pub(crate) fn at(&self, path: &str) -> Option<&SchemaNode> {
        path.split('.')
            .try_fold(self, |node, key| node.properties.as_ref()?.get(key))
    }
}

/// Declared `type` of a schema node
///
/// A node without a `type` is an object. Types outside the OpenAPI set are
/// kept verbatim so they can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    #[default]
    Object,
    Unknown(String),
}

impl PropertyType {
    pub fn parse(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `additionalProperties` of an object node
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    /// `true`
    Any,
    /// `false`
    Forbidden,
    Schema(Box<SchemaNode>),
}

impl AdditionalProperties {
    pub fn schema(&self) -> Option<&SchemaNode> {
        match self {
            Self::Schema(values) => Some(values),
            Self::Any | Self::Forbidden => None,
        }
    }
}
