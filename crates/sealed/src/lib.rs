//! Sealed - flat-tagged serde codecs for Rust enums
//!
//! Derive [`Sealed`] on an enum whose variants each wrap one payload, and the
//! enum (de)serializes as the payload's own object with a discriminator field
//! merged in:
//!
//! ```
//! use sealed::Sealed;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Icon {
//!     #[serde(rename = "iconURL")]
//!     icon_url: String,
//! }
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Image {
//!     #[serde(rename = "imageURL")]
//!     image_url: String,
//! }
//!
//! #[derive(Debug, PartialEq, Sealed)]
//! #[sealed(type_parse_rule = "upperCase")]
//! enum ImageSource {
//!     Image(Image),
//!     Icon(Icon),
//! }
//!
//! let source: ImageSource =
//!     serde_json::from_str(r#"{"type":"ICON","iconURL":"https://github.com/icons"}"#).unwrap();
//! assert_eq!(
//!     source,
//!     ImageSource::Icon(Icon { icon_url: "https://github.com/icons".into() })
//! );
//! assert_eq!(source.discriminator(), "ICON");
//! ```
//!
//! Schemas only known at runtime go through [`FlatCodec`] instead.

// Re-export sealed_core modules so users don't need to depend on sealed_core directly
pub mod codec {
    pub use sealed_core::codec::*;
}

pub mod config {
    pub use sealed_core::config::*;
}

pub mod error {
    pub use sealed_core::error::*;
}

pub mod mapping {
    pub use sealed_core::mapping::*;
}

pub mod naming {
    pub use sealed_core::naming::*;
}

pub mod schema {
    pub use sealed_core::schema::*;
}

pub use sealed_core::{
    Alternative, Config, DEFAULT_DISCRIMINATOR_KEY, Declaration, DeclarationKind, Decoded,
    FlatCodec, NamingRule, PayloadError, RuntimeError, Schema, SchemaError, Sealed, Variant,
    WireMapping,
};

// Re-export the derive macro; it shares the trait's name like serde's derives
pub use sealed_macro::Sealed;

// Re-export serde_json, the generated codecs buffer through `serde_json::Value`
pub use serde_json;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
