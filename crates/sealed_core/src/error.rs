//! Error types shared by schema extraction, mapping and the flat-merge codec.

use thiserror::Error;

/// Generation-time failure. No codec is produced when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The declaration is not a closed set of alternatives (e.g. a struct).
    #[error("`{0}` is not a sum type: `Sealed` can only be derived for enums")]
    NotASumType(String),
    #[error("variant `{0}` has no payload: every variant must wrap exactly one value")]
    VariantMissingPayload(String),
    #[error(
        "variant `{variant}` has {count} payloads: every variant must wrap exactly one value"
    )]
    VariantHasMultiplePayloads { variant: String, count: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Why a payload could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Shape(String),
}

/// Failure of a single decode or encode call.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The wire value has no keyed view (it is an array, a string, ...).
    #[error("expected a keyed object, found {0}")]
    ExpectedObject(&'static str),
    #[error("missing discriminator field `{0}`")]
    MissingDiscriminatorField(String),
    /// Holds the raw value: the string itself, or the JSON text of a
    /// non-string discriminator.
    #[error("unknown discriminator value `{0}`")]
    UnknownDiscriminatorValue(String),
    #[error("failed to decode payload of variant `{variant}`: {cause}")]
    PayloadDecodeFailure {
        variant: String,
        #[source]
        cause: PayloadError,
    },
    #[error("failed to encode payload of variant `{variant}`: {cause}")]
    PayloadEncodeFailure {
        variant: String,
        #[source]
        cause: PayloadError,
    },
}

impl RuntimeError {
    /// Name of the variant the failure is attributed to, when one was matched.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        match self {
            Self::PayloadDecodeFailure { variant, .. }
            | Self::PayloadEncodeFailure { variant, .. } => Some(variant.as_str()),
            _ => None,
        }
    }
}
