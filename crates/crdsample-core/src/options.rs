//! Generation options
//!
//! Options can be built in code or loaded from a YAML file:
//!
//! ```yaml
//! comments: true
//! requiredOnly: false
//! skipRandom: false
//! seed: 42
//! maxDepth: 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Default limit on schema nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options shared by the sample emitter and the property tree builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOptions {
    /// Emit field descriptions as YAML comments
    pub comments: bool,
    /// Only emit fields listed as required in their scope
    pub required_only: bool,
    /// Never synthesize values from patterns
    pub skip_random: bool,
    /// Seed for pattern-based values; random when unset
    pub seed: Option<u64>,
    /// Maximum schema nesting before the walk fails
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            comments: false,
            required_only: false,
            skip_random: false,
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GenerateOptions {
    /// Load options from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_required_only(mut self, required_only: bool) -> Self {
        self.required_only = required_only;
        self
    }

    pub fn with_skip_random(mut self, skip_random: bool) -> Self {
        self.skip_random = skip_random;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenerateOptions::default();
        assert!(!options.comments);
        assert!(!options.required_only);
        assert!(!options.skip_random);
        assert_eq!(options.seed, None);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let options: GenerateOptions =
            serde_yaml::from_str("requiredOnly: true\nseed: 7\n").unwrap();
        assert!(options.required_only);
        assert_eq!(options.seed, Some(7));
        assert!(!options.comments);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder() {
        let options = GenerateOptions::default()
            .with_comments(true)
            .with_skip_random(true)
            .with_max_depth(3);
        assert!(options.comments);
        assert!(options.skip_random);
        assert_eq!(options.max_depth, 3);
    }
}
