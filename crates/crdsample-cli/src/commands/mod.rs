//! CLI command implementations

pub mod generate;
pub mod tree;

use crdsample_core::{CrdParser, CrdSchema, GenerateOptions};
use std::io::Read;
use std::path::Path;

use crate::error::{CliError, Result};

/// Flags shared by the commands that walk a schema
#[derive(Debug, Clone, Default)]
pub struct OptionFlags<'a> {
    pub config: Option<&'a Path>,
    pub comments: bool,
    pub minimal: bool,
    pub no_random: bool,
    pub seed: Option<u64>,
}

impl OptionFlags<'_> {
    /// Options file first, then flags on top; a flag can only switch a setting on
    pub fn resolve(&self) -> Result<GenerateOptions> {
        let mut options = match self.config {
            Some(path) => GenerateOptions::load_from(path).map_err(|e| {
                CliError::config(format!("failed to load {}: {}", path.display(), e))
            })?,
            None => GenerateOptions::default(),
        };

        options.comments |= self.comments;
        options.required_only |= self.minimal;
        options.skip_random |= self.no_random;
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }

        tracing::debug!(?options, "resolved options");
        Ok(options)
    }
}

/// Read CRD text from a file, or from stdin when the path is `-`
fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(input).map_err(|e| CliError::Io {
        message: format!("{}: {}", input.display(), e),
    })
}

/// Every CRD in the input, in document order
pub fn load_crds(input: &Path) -> Result<Vec<CrdSchema>> {
    let text = read_input(input)?;
    let crds = CrdParser::parse_all(&text)
        .map_err(|e| CliError::input(format!("{}: {}", input.display(), e)))?;

    if crds.is_empty() {
        return Err(CliError::input_with_help(
            format!("{}: no CustomResourceDefinition found", input.display()),
            "the input must contain at least one document with `kind: CustomResourceDefinition`",
        ));
    }

    tracing::debug!(count = crds.len(), input = %input.display(), "loaded CRDs");
    Ok(crds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_switch_options_on() {
        let flags = OptionFlags {
            comments: true,
            minimal: true,
            seed: Some(3),
            ..Default::default()
        };
        let options = flags.resolve().unwrap();
        assert!(options.comments);
        assert!(options.required_only);
        assert!(!options.skip_random);
        assert_eq!(options.seed, Some(3));
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let flags = OptionFlags {
            config: Some(Path::new("/nonexistent/crdsample.yaml")),
            ..Default::default()
        };
        let err = flags.resolve().unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = load_crds(Path::new("/nonexistent/crd.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
