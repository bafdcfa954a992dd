//! Core of `sealed`: naming rules, schema extraction, discriminator mapping and
//! the flat-merge codec shared by the derive macro and its generated code.

pub mod codec;
pub mod config;
pub mod error;
pub mod mapping;
pub mod naming;
pub mod schema;

pub use codec::{Decoded, FlatCodec};
pub use config::{Config, DEFAULT_DISCRIMINATOR_KEY};
pub use error::{PayloadError, RuntimeError, SchemaError};
pub use mapping::WireMapping;
pub use naming::{NamingRule, render};
pub use schema::{Alternative, Declaration, DeclarationKind, Schema, Variant};

/// A sum type with a flat-tagged wire representation.
///
/// Implemented by `#[derive(Sealed)]`. Every variant wraps one payload whose
/// fields sit next to the discriminator in a single object.
pub trait Sealed: Sized {
    /// Field carrying the discriminator.
    const DISCRIMINATOR_KEY: &'static str;

    /// `(variant name, wire string)` for every variant, in declaration order.
    const WIRE_MAPPING: &'static [(&'static str, &'static str)];

    /// Wire string of this value's variant.
    fn discriminator(&self) -> &'static str;

    fn decode_flat(value: serde_json::Value) -> Result<Self, RuntimeError>;

    fn encode_flat(&self) -> Result<serde_json::Value, RuntimeError>;

    fn wire_for(variant: &str) -> Option<&'static str> {
        Self::WIRE_MAPPING
            .iter()
            .find(|(name, _)| *name == variant)
            .map(|(_, wire)| *wire)
    }

    fn variant_for(wire: &str) -> Option<&'static str> {
        Self::WIRE_MAPPING
            .iter()
            .find(|(_, w)| *w == wire)
            .map(|(name, _)| *name)
    }
}
