//! Display formatting for property trees

use console::style;
use crdsample_core::{PropertyDescriptor, VersionRecord};
use std::fmt::Write;

/// Header plus indented property tree for one version
pub fn version_tree(record: &VersionRecord, descriptions: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        style(&record.kind).cyan().bold(),
        style(&record.api_version).dim()
    );
    if descriptions && !record.description.is_empty() {
        let _ = writeln!(out, "{}", style(&record.description).dim().italic());
    }

    if record.properties.is_empty() {
        let _ = writeln!(out, "  {}", style("(no schema)").dim());
        return out;
    }

    for property in &record.properties {
        write_property(&mut out, property, 1, descriptions);
    }
    out
}

fn write_property(out: &mut String, property: &PropertyDescriptor, depth: usize, descriptions: bool) {
    let pad = "  ".repeat(depth);
    let _ = write!(out, "{}{} {}", pad, style(&property.name).bold(), style(&property.type_).dim());

    if property.required {
        let _ = write!(out, " {}", style("required").yellow());
    }
    if property.nullable {
        let _ = write!(out, " {}", style("nullable").dim());
    }
    if let Some(format) = &property.format {
        let _ = write!(out, " ({})", format);
    }
    if let Some(default) = &property.default {
        let _ = write!(out, " = {}", style(default).green());
    }
    if let Some(pattern) = &property.pattern {
        let _ = write!(out, " {}", style(format!("/{}/", pattern)).magenta());
    }
    let _ = writeln!(out);

    if descriptions && !property.description.is_empty() {
        for line in property.description.lines() {
            let _ = writeln!(out, "{}  {}", pad, style(line).dim());
        }
    }

    for child in &property.properties {
        write_property(out, child, depth + 1, descriptions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VersionRecord {
        let name = PropertyDescriptor {
            name: "name".to_string(),
            type_: "string".to_string(),
            required: true,
            pattern: Some("^[a-z]+$".to_string()),
            description: "Target name.".to_string(),
            ..Default::default()
        };
        let retention = PropertyDescriptor {
            name: "retention".to_string(),
            type_: "integer".to_string(),
            format: Some("int32".to_string()),
            default: Some("7".to_string()),
            nullable: true,
            ..Default::default()
        };
        let spec = PropertyDescriptor {
            name: "spec".to_string(),
            type_: "object".to_string(),
            required: true,
            properties: vec![name, retention],
            ..Default::default()
        };

        VersionRecord {
            version: "v1".to_string(),
            kind: "Backup".to_string(),
            group: "example.com".to_string(),
            api_version: "example.com/v1".to_string(),
            description: "Backup of a database.".to_string(),
            properties: vec![spec],
            yaml: String::new(),
        }
    }

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).into_owned()
    }

    #[test]
    fn test_version_tree() {
        let text = plain(&version_tree(&record(), false));
        assert_eq!(
            text,
            "\
Backup example.com/v1
  spec object required
    name string required /^[a-z]+$/
    retention integer nullable (int32) = 7
"
        );
    }

    #[test]
    fn test_descriptions() {
        let text = plain(&version_tree(&record(), true));
        assert!(text.contains("Backup example.com/v1\nBackup of a database.\n"));
        assert!(text.contains("    name string required /^[a-z]+$/\n      Target name.\n"));
    }

    #[test]
    fn test_version_without_schema() {
        let mut record = record();
        record.properties.clear();
        let text = plain(&version_tree(&record, false));
        assert_eq!(text, "Backup example.com/v1\n  (no schema)\n");
    }
}
