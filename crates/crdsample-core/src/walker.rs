//! Schema walker
//!
//! Turns a property mapping into an ordered tree of [`ResolvedField`]s. This
//! is the only place that decides field order, shape classification,
//! requiredness and the `apiVersion` / `kind` substitutions; the sample
//! emitter and the property tree builder only render its result.
//!
//! ```text
//! properties ──► SchemaWalker ──► Vec<ResolvedField> ──┬──► emitter (YAML text)
//!                    │                                 └──► tree (PropertyDescriptor)
//!                    └── ValueSynthesizer (leaf samples)
//! ```

use crate::error::{Result, SampleError};
use crate::options::GenerateOptions;
use crate::schema::{CrdSchema, Properties, RootSchema, SchemaNode};
use crate::value::ValueSynthesizer;

/// One field of the schema with everything needed to render it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField<'s> {
    /// Field name
    pub name: String,
    /// Listed in the required list of the enclosing scope
    pub required: bool,
    /// Declaration of this field
    pub schema: &'s SchemaNode,
    /// Literal written after the key; when set, rendering stops here
    pub sample: Option<String>,
    /// Structural shape and children
    pub shape: FieldShape<'s>,
}

impl<'s> ResolvedField<'s> {
    /// Children of object, array-item and map scopes
    pub fn children(&self) -> &[ResolvedField<'s>] {
        match &self.shape {
            FieldShape::Leaf => &[],
            FieldShape::Object(children)
            | FieldShape::ArrayOfObjects(children)
            | FieldShape::Map(children) => children,
        }
    }
}

/// How a field nests
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape<'s> {
    /// Scalar, scalar array, or anything else without nested fields
    Leaf,
    /// Object with its own properties
    Object(Vec<ResolvedField<'s>>),
    /// Array whose items are objects with properties
    ArrayOfObjects(Vec<ResolvedField<'s>>),
    /// Object defined through `additionalProperties`; empty when values are unstructured
    Map(Vec<ResolvedField<'s>>),
}

/// Immutable per-level walk state
#[derive(Debug, Clone, Copy)]
struct WalkContext<'a> {
    depth: usize,
    path: &'a str,
}

impl<'a> WalkContext<'a> {
    fn root() -> Self {
        Self { depth: 0, path: "" }
    }

    fn descend(self, path: &'a str) -> Self {
        Self {
            depth: self.depth + 1,
            path,
        }
    }
}

/// Walks the schema of one CRD version
#[derive(Debug)]
pub struct SchemaWalker<'c> {
    api_version: String,
    kind: &'c str,
    max_depth: usize,
    sentinel_children: bool,
    values: ValueSynthesizer,
}

impl<'c> SchemaWalker<'c> {
    /// Create a walker for one version of a CRD
    pub fn new(crd: &'c CrdSchema, version: &str, options: &GenerateOptions) -> Self {
        Self::with_identity(crd.api_version(version), &crd.kind, options)
    }

    /// Create a walker from an explicit `apiVersion` and root `kind`
    pub fn with_identity(
        api_version: impl Into<String>,
        kind: &'c str,
        options: &GenerateOptions,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind,
            max_depth: options.max_depth,
            sentinel_children: false,
            values: ValueSynthesizer::new(options),
        }
    }

    /// Also walk the declared children of `apiVersion` and root `kind`
    ///
    /// Samples never show them, so by default the walk stops at the
    /// substituted value. Property trees describe them like any other field.
    pub fn with_sentinel_children(mut self) -> Self {
        self.sentinel_children = true;
        self
    }

    /// Walk a version's root schema
    pub fn walk<'s>(&mut self, schema: &'s RootSchema) -> Result<Vec<ResolvedField<'s>>> {
        tracing::debug!(
            api_version = %self.api_version,
            fields = schema.properties.len(),
            "walking schema"
        );
        self.walk_properties(&schema.properties, &schema.required)
    }

    /// Walk a top-level property mapping whose required list is `required`
    pub fn walk_properties<'s>(
        &mut self,
        properties: &'s Properties,
        required: &[String],
    ) -> Result<Vec<ResolvedField<'s>>> {
        self.walk_scope(properties, required, WalkContext::root())
    }

    fn walk_scope<'s>(
        &mut self,
        properties: &'s Properties,
        required: &[String],
        ctx: WalkContext<'_>,
    ) -> Result<Vec<ResolvedField<'s>>> {
        if ctx.depth > self.max_depth {
            return Err(SampleError::DepthExceeded {
                path: ctx.path.to_string(),
                max: self.max_depth,
            });
        }

        // Properties iterate in lexicographic key order
        let mut fields = Vec::with_capacity(properties.len());
        for (name, prop) in properties {
            let path = if ctx.path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", ctx.path, name)
            };
            let child_ctx = ctx.descend(&path);

            let substituted = self.substitute(name, ctx);
            let shape = match substituted {
                Some(_) if !self.sentinel_children => FieldShape::Leaf,
                _ => self.classify(prop, child_ctx)?,
            };
            let sample = match substituted {
                Some(sample) => Some(sample),
                None if matches!(shape, FieldShape::Leaf) => Some(self.values.synthesize(prop)),
                None => None,
            };

            fields.push(ResolvedField {
                name: name.clone(),
                required: required.iter().any(|r| r == name),
                schema: prop,
                sample,
                shape,
            });
        }

        Ok(fields)
    }

    /// Sentinel fields whose value comes from the CRD rather than the schema
    fn substitute(&self, name: &str, ctx: WalkContext<'_>) -> Option<String> {
        match name {
            "apiVersion" => Some(self.api_version.clone()),
            "kind" if ctx.depth == 0 => Some(self.kind.to_string()),
            _ => None,
        }
    }

    fn classify<'s>(
        &mut self,
        prop: &'s SchemaNode,
        ctx: WalkContext<'_>,
    ) -> Result<FieldShape<'s>> {
        if let Some(additional) = &prop.additional_properties {
            // Map values are only expanded when both sides declare properties
            if prop.has_nested_properties()
                && let Some(values) = additional.schema()
                && let Some(properties) = values.nested()
            {
                let children = self.walk_scope(properties, values.required_fields(), ctx)?;
                return Ok(FieldShape::Map(children));
            }
            return Ok(FieldShape::Map(Vec::new()));
        }

        if let Some(properties) = prop.nested() {
            let children = self.walk_scope(properties, prop.required_fields(), ctx)?;
            return Ok(FieldShape::Object(children));
        }

        if let Some(items) = prop.object_items()
            && let Some(properties) = items.nested()
        {
            let children = self.walk_scope(properties, items.required_fields(), ctx)?;
            return Ok(FieldShape::ArrayOfObjects(children));
        }

        Ok(FieldShape::Leaf)
    }
}
