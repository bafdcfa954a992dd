//! Sum-type schema model and extraction.
//!
//! A [`Declaration`] is the raw, unvalidated description of a type as the
//! declaration parser saw it. [`Schema::extract`] validates it and produces the
//! ordered [`Schema`] every later stage works from.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::naming::strip_raw_prefix;

/// Shape of the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Enum,
    Struct,
    Union,
}

/// One declared alternative with every payload type it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    /// Payload type references as written in the declaration
    pub payloads: Vec<String>,
}

impl Alternative {
    pub fn new(name: impl Into<String>, payloads: Vec<String>) -> Self {
        Self {
            name: name.into(),
            payloads,
        }
    }
}

/// Raw declaration handed over by the declaration parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub alternatives: Vec<Alternative>,
}

/// A validated variant: a name and exactly one payload type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    pub payload_type: String,
}

impl Variant {
    pub fn new(name: impl Into<String>, payload_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload_type: payload_type.into(),
        }
    }
}

/// Ordered set of variants of one sum type.
///
/// Empty schemas are valid; a codec built from one rejects every input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl Schema {
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Validate a raw declaration into a schema.
    ///
    /// Stops at the first offending alternative; nothing is returned for a
    /// declaration that is only partly valid.
    pub fn extract(declaration: &Declaration) -> Result<Self, SchemaError> {
        if declaration.kind != DeclarationKind::Enum {
            return Err(SchemaError::NotASumType(declaration.name.clone()));
        }

        let mut variants = Vec::with_capacity(declaration.alternatives.len());
        for alternative in &declaration.alternatives {
            let name = strip_raw_prefix(&alternative.name).to_string();
            match alternative.payloads.as_slice() {
                [] => return Err(SchemaError::VariantMissingPayload(name)),
                [payload] => variants.push(Variant::new(name, payload.clone())),
                payloads => {
                    return Err(SchemaError::VariantHasMultiplePayloads {
                        variant: name,
                        count: payloads.len(),
                    });
                }
            }
        }

        Ok(Self::new(declaration.name.clone(), variants))
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }
}
