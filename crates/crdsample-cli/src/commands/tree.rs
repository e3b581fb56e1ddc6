//! Tree command - show the property tree of every CRD version

use crdsample_core::{GenerateOptions, VersionRecord, build_version_records};
use std::path::Path;

use super::load_crds;
use crate::display;
use crate::error::{CliError, Result};

pub fn run(input: &Path, json: bool, options: &GenerateOptions) -> Result<()> {
    let crds = load_crds(input)?;

    let mut records: Vec<VersionRecord> = Vec::new();
    for crd in &crds {
        records.extend(build_version_records(crd, options)?);
    }

    if json {
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::other(format!("failed to serialize tree: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", display::version_tree(record, options.comments));
    }

    Ok(())
}
