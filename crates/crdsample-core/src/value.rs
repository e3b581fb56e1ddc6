//! Sample values for leaf fields
//!
//! A leaf gets the first of: its default, its example, a string generated
//! from its pattern, its first enum value, or a placeholder for its type.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::options::GenerateOptions;
use crate::pattern;
use crate::schema::{PropertyType, SchemaNode};

/// Produces the literal written after a leaf field's key
#[derive(Debug)]
pub struct ValueSynthesizer {
    skip_random: bool,
    rng: StdRng,
}

impl ValueSynthesizer {
    pub fn new(options: &GenerateOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            skip_random: options.skip_random,
            rng,
        }
    }

    /// Synthesize the sample literal for `prop`
    pub fn synthesize(&mut self, prop: &SchemaNode) -> String {
        if let Some(default) = &prop.default {
            return raw(default);
        }

        if let Some(example) = &prop.example {
            return raw(example);
        }

        if let Some(sample) = self.from_pattern(prop) {
            return sample;
        }

        if let Some(first) = prop.enum_values.as_ref().and_then(|values| values.first()) {
            return raw(first);
        }

        match &prop.type_ {
            PropertyType::String => "string".to_string(),
            PropertyType::Integer => match prop.minimum {
                Some(minimum) => (minimum as i64).to_string(),
                None => "1".to_string(),
            },
            PropertyType::Boolean => "true".to_string(),
            PropertyType::Object => "{}".to_string(),
            PropertyType::Array => {
                let item_type = prop
                    .items
                    .as_ref()
                    .map(|items| items.type_.to_string())
                    .unwrap_or_else(|| PropertyType::default().to_string());
                let count = prop.min_items.unwrap_or(0) as usize;
                let items = vec![item_type.as_str(); count];
                format!(
                    "[{}] # minItems {} of type {}",
                    items.join(","),
                    count,
                    item_type
                )
            }
            other @ (PropertyType::Number | PropertyType::Unknown(_)) => other.to_string(),
        }
    }

    fn from_pattern(&mut self, prop: &SchemaNode) -> Option<String> {
        if self.skip_random {
            return None;
        }
        let pattern = prop.pattern.as_deref()?;

        if let Err(e) = regex::Regex::new(pattern) {
            tracing::trace!(pattern, error = %e, "invalid pattern, falling back");
            return None;
        }

        let value = pattern::generate(pattern, &mut self.rng)?;
        let keep_typed = prop.type_ != PropertyType::String;
        Some(format!("{} # {}", scalar(&value, keep_typed), pattern))
    }
}

/// Raw JSON form of a schema-provided value
fn raw(value: &Value) -> String {
    value.to_string()
}

/// `text` as a YAML scalar that reads back as `text`
///
/// Plain style is used when it parses to the same string, or to a number or
/// boolean for fields that are not strings. Anything else is written as a
/// double-quoted JSON string, which YAML accepts as is.
fn scalar(text: &str, keep_typed: bool) -> String {
    let plain = match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(serde_yaml::Value::String(parsed)) => parsed == text,
        Ok(serde_yaml::Value::Number(_) | serde_yaml::Value::Bool(_)) => keep_typed,
        _ => false,
    };

    if plain && !text.contains(" #") {
        text.to_string()
    } else {
        Value::String(text.to_string()).to_string()
    }
}
