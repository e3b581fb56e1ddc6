//! Generate command - write sample documents for every CRD version

use console::style;
use crdsample_core::GenerateOptions;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::load_crds;
use crate::error::Result;

pub fn run(input: &Path, output: Option<&Path>, options: &GenerateOptions) -> Result<()> {
    let crds = load_crds(input)?;

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    crdsample_core::generate_all(&crds, sink, options)?;

    if let Some(path) = output {
        let versions: usize = crds.iter().map(|crd| crd.versions.len()).sum();
        eprintln!(
            "{} Wrote {} version(s) of {} CRD(s) to {}",
            style("✓").green(),
            versions,
            crds.len(),
            path.display()
        );
    }

    Ok(())
}
