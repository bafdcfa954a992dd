//! Variant name to discriminator string mapping.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::Config;
use crate::error::SchemaError;
use crate::naming::render;
use crate::schema::Schema;

/// One `(variant name, wire string)` pair per variant, in schema order.
///
/// Built once per schema; [`WireMapping::build`] guarantees the wire strings are
/// non-empty and pairwise distinct, so lookups work in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WireMapping {
    entries: Vec<(String, String)>,
}

impl WireMapping {
    pub fn build(schema: &Schema, config: &Config) -> Result<Self, SchemaError> {
        config.validate()?;

        let mut entries = Vec::with_capacity(schema.len());
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(schema.len());

        for variant in &schema.variants {
            let wire = render(&variant.name, config.naming_rule);
            if wire.is_empty() {
                return Err(SchemaError::InvalidConfiguration(format!(
                    "variant `{}` renders to an empty discriminator under `{}`",
                    variant.name, config.naming_rule
                )));
            }
            if let Some(previous) = seen.insert(wire.clone(), &variant.name) {
                return Err(SchemaError::InvalidConfiguration(format!(
                    "variants `{previous}` and `{}` both render to discriminator `{wire}` under `{}`",
                    variant.name, config.naming_rule
                )));
            }
            entries.push((variant.name.clone(), wire));
        }

        Ok(Self { entries })
    }

    pub fn wire_for(&self, variant: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, wire)| wire.as_str())
    }

    pub fn variant_for(&self, wire: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, w)| w == wire)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, wire)| (name.as_str(), wire.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
