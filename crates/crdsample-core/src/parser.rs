//! CRD manifest loading
//!
//! Reads CustomResourceDefinition manifests (YAML or JSON, `apiextensions.k8s.io`
//! `v1` or the older `v1beta1` layout) into [`CrdSchema`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SampleError};
use crate::schema::{
    AdditionalProperties, CrdSchema, CrdVersion, Properties, PropertyType, RootSchema, SchemaNode,
};

const CRD_KIND: &str = "CustomResourceDefinition";

/// Type shown for `x-kubernetes-int-or-string` nodes that declare no `type`
const INT_OR_STRING: &str = "int-or-string";

/// Loader for CRD manifests
pub struct CrdParser;

impl CrdParser {
    /// Load a single CRD manifest
    pub fn parse(text: &str) -> Result<CrdSchema> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| SampleError::Serialization(format!("invalid CRD YAML: {}", e)))?;

        Self::parse_value(&value)
    }

    /// Load every CRD of a multi-document stream
    ///
    /// Empty documents and documents of any other kind are skipped.
    pub fn parse_all(text: &str) -> Result<Vec<CrdSchema>> {
        let mut crds = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
            let number = index + 1;
            let value = Value::deserialize(document).map_err(|e| {
                SampleError::Serialization(format!("invalid YAML in document {}: {}", number, e))
            })?;

            if value.is_null() {
                continue;
            }

            match value.get("kind").and_then(Value::as_str) {
                Some(CRD_KIND) => crds.push(Self::parse_value(&value)?),
                kind => tracing::warn!(
                    document = number,
                    kind = kind.unwrap_or("<none>"),
                    "skipping document that is not a CustomResourceDefinition"
                ),
            }
        }

        Ok(crds)
    }

    /// Load a CRD that is already decoded
    pub fn parse_value(value: &Value) -> Result<CrdSchema> {
        let kind = required_str(value, "kind")?;
        if kind != CRD_KIND {
            return Err(SampleError::InvalidCrd(format!(
                "expected {}, got {}",
                CRD_KIND, kind
            )));
        }

        let name = required_str(value, "metadata.name")?.to_string();
        let group = required_str(value, "spec.group")?.to_string();
        let crd_kind = required_str(value, "spec.names.kind")?.to_string();

        let spec = &value["spec"];
        let shared = spec
            .pointer("/validation/openAPIV3Schema")
            .map(root_schema);

        let versions = match spec.get("versions").and_then(Value::as_array) {
            Some(versions) => versions
                .iter()
                .map(|version| parse_version(version, shared.as_ref()))
                .collect::<Result<Vec<_>>>()?,
            // v1beta1 with a single `spec.version`
            None => vec![CrdVersion {
                name: required_str(value, "spec.version")?.to_string(),
                schema: shared,
            }],
        };

        tracing::debug!(crd = %name, versions = versions.len(), "loaded CustomResourceDefinition");

        Ok(CrdSchema {
            name,
            group,
            kind: crd_kind,
            versions,
        })
    }

    /// Decode one schema node and everything below it
    pub fn parse_node(value: &Value) -> SchemaNode {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);

        // A tuple-style `items` list only contributes its first schema
        let items = value.get("items").map(|items| match items {
            Value::Array(tuple) => Box::new(tuple.first().map(Self::parse_node).unwrap_or_default()),
            single => Box::new(Self::parse_node(single)),
        });

        let additional_properties = value.get("additionalProperties").map(|extra| match extra {
            Value::Bool(true) => AdditionalProperties::Any,
            Value::Bool(false) => AdditionalProperties::Forbidden,
            values => AdditionalProperties::Schema(Box::new(Self::parse_node(values))),
        });

        SchemaNode {
            type_: node_type(value),
            description: text("description"),
            format: text("format"),
            pattern: text("pattern"),
            default: value.get("default").cloned(),
            example: value.get("example").cloned(),
            enum_values: value.get("enum").and_then(Value::as_array).cloned(),
            minimum: value.get("minimum").and_then(Value::as_f64),
            min_items: value.get("minItems").and_then(Value::as_u64),
            nullable: value.get("nullable").and_then(Value::as_bool).unwrap_or(false),
            properties: properties(value),
            required: string_list(value.get("required")),
            items,
            additional_properties,
        }
    }
}

/// String at a dot-separated path, or an `InvalidCrd` naming the path
fn required_str<'v>(value: &'v Value, path: &str) -> Result<&'v str> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| SampleError::InvalidCrd(format!("missing '{}'", path)))
}

fn parse_version(version: &Value, shared: Option<&RootSchema>) -> Result<CrdVersion> {
    let name = required_str(version, "name")?.to_string();
    let schema = version
        .pointer("/schema/openAPIV3Schema")
        .map(root_schema)
        .or_else(|| shared.cloned());

    Ok(CrdVersion { name, schema })
}

fn root_schema(value: &Value) -> RootSchema {
    RootSchema {
        description: value
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        properties: properties(value).unwrap_or_default(),
        required: string_list(value.get("required")).unwrap_or_default(),
    }
}

fn properties(value: &Value) -> Option<Properties> {
    let fields = value.get("properties")?.as_object()?;
    Some(
        fields
            .iter()
            .map(|(name, node)| (name.clone(), CrdParser::parse_node(node)))
            .collect(),
    )
}

fn node_type(value: &Value) -> PropertyType {
    if let Some(name) = value.get("type").and_then(Value::as_str) {
        return PropertyType::parse(name);
    }
    match value.get("x-kubernetes-int-or-string").and_then(Value::as_bool) {
        Some(true) => PropertyType::Unknown(INT_OR_STRING.to_string()),
        _ => PropertyType::default(),
    }
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(items.iter().filter_map(Value::as_str).map(String::from).collect())
}
