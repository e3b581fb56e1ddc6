//! Sample document emitter
//!
//! Renders walked fields as YAML text into any [`Write`] sink. Two spaces per
//! nesting level; arrays of objects get one item whose first key shares the
//! `- ` line.
//!
//! ```yaml
//! apiVersion: example.com/v1
//! kind: Widget
//! spec:
//!   ports:
//!   - name: string
//!     port: 1
//! ```

use std::io::Write;

use crate::error::{Result, SampleError};
use crate::options::GenerateOptions;
use crate::schema::{CrdSchema, CrdVersion};
use crate::walker::{FieldShape, ResolvedField, SchemaWalker};

/// Fields every Kubernetes object carries, kept at the root in required-only mode
pub const ROOT_REQUIRED_FIELDS: [&str; 4] = ["apiVersion", "kind", "metadata", "spec"];

/// Separator written between the samples of successive versions
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Immutable per-level rendering state
#[derive(Debug, Clone, Copy, Default)]
struct RenderContext {
    indent: usize,
    in_array: bool,
}

impl RenderContext {
    fn nested(self) -> Self {
        Self {
            indent: self.indent + 2,
            in_array: false,
        }
    }

    fn array_item(self) -> Self {
        Self {
            indent: self.indent + 2,
            in_array: true,
        }
    }

    fn next_sibling(self) -> Self {
        Self {
            in_array: false,
            ..self
        }
    }
}

/// Generates sample YAML documents for CRDs
#[derive(Debug, Clone, Default)]
pub struct SampleGenerator {
    options: GenerateOptions,
}

impl SampleGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Write samples for every version of `crd` into `sink`, then close it
    ///
    /// The sink is flushed and dropped whether or not generation succeeded. A
    /// failure to close is reported together with any earlier error.
    pub fn generate<W: Write>(&self, crd: &CrdSchema, sink: W) -> Result<()> {
        self.generate_all(std::slice::from_ref(crd), sink)
    }

    /// Write samples for several CRDs into one sink, then close it
    pub fn generate_all<W: Write>(&self, crds: &[CrdSchema], mut sink: W) -> Result<()> {
        let result = self.write_all(crds, &mut sink);
        let closed = sink.flush().map_err(SampleError::Close);
        drop(sink);

        match (result, closed) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(e), Err(close)) => Err(SampleError::join(Some(e), close)),
        }
    }

    fn write_all<W: Write + ?Sized>(&self, crds: &[CrdSchema], out: &mut W) -> Result<()> {
        for (i, crd) in crds.iter().enumerate() {
            self.write_versions(crd, out)?;

            if i + 1 < crds.len() {
                out.write_all(DOCUMENT_SEPARATOR.as_bytes())
                    .map_err(SampleError::Write)?;
            }
        }
        Ok(())
    }

    /// Write samples for every version, separated by document markers
    pub fn write_versions<W: Write + ?Sized>(&self, crd: &CrdSchema, out: &mut W) -> Result<()> {
        for (i, version) in crd.versions.iter().enumerate() {
            self.write_version(crd, version, out)?;

            if i + 1 < crd.versions.len() {
                out.write_all(DOCUMENT_SEPARATOR.as_bytes())
                    .map_err(SampleError::Write)?;
            }
        }
        Ok(())
    }

    /// Write the sample for a single version; a version without schema writes nothing
    pub fn write_version<W: Write + ?Sized>(
        &self,
        crd: &CrdSchema,
        version: &CrdVersion,
        out: &mut W,
    ) -> Result<()> {
        let Some(schema) = &version.schema else {
            tracing::debug!(version = %version.name, "version has no schema, nothing to emit");
            return Ok(());
        };

        let fields = SchemaWalker::new(crd, &version.name, &self.options).walk(schema)?;
        self.render(&fields, out)
    }

    /// Sample document for a single version
    pub fn version_sample(&self, crd: &CrdSchema, version: &CrdVersion) -> Result<String> {
        let mut buf = Vec::new();
        self.write_version(crd, version, &mut buf)?;
        String::from_utf8(buf).map_err(|e| SampleError::Serialization(e.to_string()))
    }

    /// Render already-walked root fields
    pub fn render<W: Write + ?Sized>(&self, fields: &[ResolvedField<'_>], out: &mut W) -> Result<()> {
        let root: Vec<&ResolvedField<'_>> = fields
            .iter()
            .filter(|f| {
                !self.options.required_only
                    || f.required
                    || ROOT_REQUIRED_FIELDS.contains(&f.name.as_str())
            })
            .collect();

        self.render_scope(&root, RenderContext::default(), out)
            .map_err(SampleError::Write)
    }

    /// Children of a scope that survive required-only filtering
    fn kept<'f, 's>(&self, children: &'f [ResolvedField<'s>]) -> Vec<&'f ResolvedField<'s>> {
        children
            .iter()
            .filter(|f| !self.options.required_only || f.required)
            .collect()
    }

    fn render_scope<W: Write + ?Sized>(
        &self,
        fields: &[&ResolvedField<'_>],
        ctx: RenderContext,
        out: &mut W,
    ) -> std::io::Result<()> {
        for (i, field) in fields.iter().enumerate() {
            let field_ctx = if i == 0 { ctx } else { ctx.next_sibling() };
            self.render_field(field, field_ctx, out)?;
        }
        Ok(())
    }

    fn render_field<W: Write + ?Sized>(
        &self,
        field: &ResolvedField<'_>,
        ctx: RenderContext,
        out: &mut W,
    ) -> std::io::Result<()> {
        let pad = " ".repeat(ctx.indent);

        // Inside an array item the `- ` marker (and comments) are already written
        if ctx.in_array {
            write!(out, "{}:", field.name)?;
        } else {
            self.write_comments(field, ctx.indent, out)?;
            write!(out, "{}{}:", pad, field.name)?;
        }

        if let Some(sample) = &field.sample {
            return writeln!(out, " {}", sample);
        }

        match &field.shape {
            FieldShape::Leaf => writeln!(out),
            FieldShape::Object(children) | FieldShape::Map(children) => {
                let kept = self.kept(children);
                if kept.is_empty() {
                    return writeln!(out, " {{}}");
                }
                writeln!(out)?;
                self.render_scope(&kept, ctx.nested(), out)
            }
            FieldShape::ArrayOfObjects(children) => {
                let kept = self.kept(children);
                writeln!(out)?;
                let Some(first) = kept.first() else {
                    return writeln!(out, "{}- {{}}", pad);
                };
                self.write_comments(first, ctx.indent, out)?;
                write!(out, "{}- ", pad)?;
                self.render_scope(&kept, ctx.array_item(), out)
            }
        }
    }

    fn write_comments<W: Write + ?Sized>(
        &self,
        field: &ResolvedField<'_>,
        indent: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        if !self.options.comments {
            return Ok(());
        }
        let Some(description) = field.schema.description.as_deref().filter(|d| !d.is_empty())
        else {
            return Ok(());
        };

        let pad = " ".repeat(indent);
        for line in description.lines() {
            if line.is_empty() {
                writeln!(out, "{}#", pad)?;
            } else {
                writeln!(out, "{}# {}", pad, line)?;
            }
        }
        Ok(())
    }
}

/// Write samples for every version of `crd` into `sink` and close it
pub fn generate<W: Write>(crd: &CrdSchema, sink: W, options: &GenerateOptions) -> Result<()> {
    SampleGenerator::new(options.clone()).generate(crd, sink)
}

/// Write samples for every version of several CRDs into `sink` and close it
pub fn generate_all<W: Write>(crds: &[CrdSchema], sink: W, options: &GenerateOptions) -> Result<()> {
    SampleGenerator::new(options.clone()).generate_all(crds, sink)
}
