//! Flat-merge codec.
//!
//! The discriminator and the payload's own fields are siblings in one keyed
//! object:
//!
//! ```json
//! { "type": "ICON", "iconURL": "https://x/y" }
//! ```
//!
//! Decoding reads the discriminator through a keyed view, then hands the *whole*
//! object (discriminator included) to the payload decoder. Encoding writes the
//! payload into a fresh object and then adds the discriminator to that same
//! object.
//!
//! The free functions are the primitives generated code calls. [`FlatCodec`]
//! runs the same protocol for schemas only known at runtime.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{PayloadError, RuntimeError, SchemaError};
use crate::mapping::WireMapping;
use crate::schema::{Schema, Variant};

/// Short description of a JSON value's kind, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read the discriminator string stored under `key`.
///
/// A discriminator that is present but not a string is reported as an unknown
/// value carrying its JSON text.
pub fn read_discriminator<'v>(value: &'v Value, key: &str) -> Result<&'v str, RuntimeError> {
    let Some(object) = value.as_object() else {
        let found = value_kind(value);
        tracing::debug!(key, found, "cannot decode flat value: not an object");
        return Err(RuntimeError::ExpectedObject(found));
    };

    match object.get(key) {
        Some(Value::String(raw)) => {
            tracing::trace!(key, discriminator = %raw, "read discriminator");
            Ok(raw.as_str())
        }
        Some(other) => {
            let raw = other.to_string();
            tracing::debug!(key, raw = %raw, "discriminator is not a string");
            Err(RuntimeError::UnknownDiscriminatorValue(raw))
        }
        None => {
            tracing::debug!(key, "missing discriminator field");
            Err(RuntimeError::MissingDiscriminatorField(key.to_string()))
        }
    }
}

/// Error for a discriminator that matches no variant.
pub fn unknown_discriminator(key: &str, raw: &str) -> RuntimeError {
    tracing::debug!(key, raw, "unknown discriminator value");
    RuntimeError::UnknownDiscriminatorValue(raw.to_string())
}

/// Decode the whole flat object as the payload of `variant`.
pub fn decode_payload<P>(value: Value, variant: &str) -> Result<P, RuntimeError>
where
    P: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(variant, error = %err, "payload decode failed");
        RuntimeError::PayloadDecodeFailure {
            variant: variant.to_string(),
            cause: PayloadError::Serde(err),
        }
    })
}

fn encode_failure(variant: &str, cause: PayloadError) -> RuntimeError {
    tracing::debug!(variant, error = %cause, "payload encode failed");
    RuntimeError::PayloadEncodeFailure {
        variant: variant.to_string(),
        cause,
    }
}

/// Encode `payload` and merge the discriminator `key: wire` into the result.
///
/// The payload must encode to an object that does not already use `key`.
pub fn encode_payload<P>(
    payload: &P,
    key: &str,
    wire: &str,
    variant: &str,
) -> Result<Value, RuntimeError>
where
    P: Serialize + ?Sized,
{
    let encoded =
        serde_json::to_value(payload).map_err(|err| encode_failure(variant, err.into()))?;

    let mut object = match encoded {
        Value::Object(object) => object,
        other => {
            return Err(encode_failure(
                variant,
                PayloadError::Shape(format!(
                    "payload encoded to {}, expected an object",
                    value_kind(&other)
                )),
            ));
        }
    };

    if object.contains_key(key) {
        return Err(encode_failure(
            variant,
            PayloadError::Shape(format!(
                "payload already has a field named `{key}`, which is the discriminator key"
            )),
        ));
    }

    object.insert(key.to_string(), Value::String(wire.to_string()));
    Ok(Value::Object(object))
}

/// Result of matching a flat object against a [`FlatCodec`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<'a> {
    pub variant: &'a Variant,
    /// The whole input object, discriminator included.
    pub payload: Value,
}

impl Decoded<'_> {
    pub fn into_payload<P>(self) -> Result<P, RuntimeError>
    where
        P: DeserializeOwned,
    {
        decode_payload(self.payload, &self.variant.name)
    }
}

/// Runtime registry: the flat-merge protocol driven by a [`Schema`] value.
#[derive(Debug, Clone)]
pub struct FlatCodec {
    schema: Schema,
    discriminator_key: String,
    mapping: WireMapping,
}

impl FlatCodec {
    /// Validate `config` and build the wire mapping for `schema`.
    pub fn generate(schema: Schema, config: &Config) -> Result<Self, SchemaError> {
        let mapping = WireMapping::build(&schema, config)?;
        tracing::debug!(
            schema = %schema.name,
            variants = schema.len(),
            key = %config.discriminator_key,
            rule = %config.naming_rule,
            "generated flat codec"
        );
        Ok(Self {
            schema,
            discriminator_key: config.discriminator_key.clone(),
            mapping,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn discriminator_key(&self) -> &str {
        &self.discriminator_key
    }

    pub fn mapping(&self) -> &WireMapping {
        &self.mapping
    }

    /// Select the variant of a flat object without decoding its payload.
    pub fn decode(&self, value: Value) -> Result<Decoded<'_>, RuntimeError> {
        let raw = read_discriminator(&value, &self.discriminator_key)?;
        let variant = self
            .mapping
            .variant_for(raw)
            .and_then(|name| self.schema.variant(name))
            .ok_or_else(|| unknown_discriminator(&self.discriminator_key, raw))?;
        Ok(Decoded {
            variant,
            payload: value,
        })
    }

    pub fn decode_as<P>(&self, value: Value) -> Result<(&Variant, P), RuntimeError>
    where
        P: DeserializeOwned,
    {
        let decoded = self.decode(value)?;
        let variant = decoded.variant;
        Ok((variant, decoded.into_payload()?))
    }

    pub fn encode<P>(&self, variant: &str, payload: &P) -> Result<Value, RuntimeError>
    where
        P: Serialize + ?Sized,
    {
        let Some(wire) = self.mapping.wire_for(variant) else {
            return Err(encode_failure(
                variant,
                PayloadError::Shape(format!(
                    "variant is not part of schema `{}`",
                    self.schema.name
                )),
            ));
        };
        encode_payload(payload, &self.discriminator_key, wire, variant)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::naming::NamingRule;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Icon {
        #[serde(rename = "iconURL")]
        icon_url: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Lottie {
        #[serde(rename = "lottieURL")]
        lottie_url: String,
    }

    fn image_source() -> FlatCodec {
        let schema = Schema::new(
            "ImageSource",
            vec![
                Variant::new("image", "Image"),
                Variant::new("lottie", "Lottie"),
                Variant::new("icon", "Icon"),
            ],
        );
        FlatCodec::generate(schema, &Config::with_rule(NamingRule::UpperCase)).unwrap()
    }

    #[test]
    fn test_encode_merges_discriminator_into_payload() {
        let codec = image_source();
        let icon = Icon {
            icon_url: "https://x/y".into(),
        };

        let encoded = codec.encode("icon", &icon).unwrap();
        assert_eq!(encoded, json!({"type": "ICON", "iconURL": "https://x/y"}));
    }

    #[test]
    fn test_decode_selects_variant_and_keeps_whole_object() {
        let codec = image_source();
        let input = json!({"type": "LOTTIE", "lottieURL": "https://github.com/images"});

        let decoded = codec.decode(input.clone()).unwrap();
        assert_eq!(decoded.variant.name, "lottie");
        assert_eq!(decoded.payload, input);

        let (variant, lottie) = codec.decode_as::<Lottie>(input).unwrap();
        assert_eq!(variant.payload_type, "Lottie");
        assert_eq!(lottie.lottie_url, "https://github.com/images");
    }

    #[test]
    fn test_round_trip() {
        let codec = image_source();
        let icon = Icon {
            icon_url: "https://github.com/icons".into(),
        };
        let encoded = codec.encode("icon", &icon).unwrap();
        let (variant, decoded) = codec.decode_as::<Icon>(encoded).unwrap();
        assert_eq!(variant.name, "icon");
        assert_eq!(decoded, icon);
    }

    #[test]
    fn test_decode_unknown_discriminator() {
        let err = image_source().decode(json!({"type": "UNKNOWN"})).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownDiscriminatorValue(raw) if raw == "UNKNOWN"));
    }

    #[test]
    fn test_decode_discriminator_is_case_sensitive() {
        let err = image_source().decode(json!({"type": "icon"})).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownDiscriminatorValue(raw) if raw == "icon"));
    }

    #[test]
    fn test_decode_missing_discriminator() {
        let err = image_source()
            .decode(json!({"iconURL": "https://x/y"}))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingDiscriminatorField(key) if key == "type"));
    }

    #[rstest]
    #[case(json!({"type": 3}), "3")]
    #[case(json!({"type": null}), "null")]
    #[case(json!({"type": ["ICON"]}), "[\"ICON\"]")]
    fn test_decode_non_string_discriminator(#[case] input: Value, #[case] raw: &str) {
        let err = image_source().decode(input).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownDiscriminatorValue(found) if found == raw));
    }

    #[rstest]
    #[case(json!([{"type": "ICON"}]), "an array")]
    #[case(json!("ICON"), "a string")]
    #[case(json!(null), "null")]
    fn test_decode_rejects_non_object(#[case] input: Value, #[case] kind: &str) {
        let err = image_source().decode(input).unwrap_err();
        assert!(matches!(err, RuntimeError::ExpectedObject(found) if found == kind));
    }

    #[test]
    fn test_decode_payload_failure_names_variant() {
        let err = image_source()
            .decode_as::<Icon>(json!({"type": "ICON", "iconURL": 42}))
            .unwrap_err();
        assert_eq!(err.variant(), Some("icon"));
        assert!(matches!(err, RuntimeError::PayloadDecodeFailure { .. }));
    }

    #[test]
    fn test_empty_schema_never_decodes() {
        let codec = FlatCodec::generate(
            Schema::new("Never", vec![]),
            &Config::with_rule(NamingRule::UpperCase),
        )
        .unwrap();

        assert!(matches!(
            codec.decode(json!({"type": "ICON"})),
            Err(RuntimeError::UnknownDiscriminatorValue(_))
        ));
        assert!(matches!(
            codec.decode(json!({})),
            Err(RuntimeError::MissingDiscriminatorField(_))
        ));
    }

    #[test]
    fn test_custom_discriminator_key() {
        let schema = Schema::new("Media", vec![Variant::new("IconType", "Icon")]);
        let codec =
            FlatCodec::generate(schema, &Config::new("kind", NamingRule::UpperSnakeCase)).unwrap();
        let icon = Icon {
            icon_url: "u".into(),
        };

        let encoded = codec.encode("IconType", &icon).unwrap();
        assert_eq!(encoded, json!({"kind": "ICON_TYPE", "iconURL": "u"}));
        assert!(matches!(
            codec.decode(json!({"type": "ICON_TYPE"})),
            Err(RuntimeError::MissingDiscriminatorField(key)) if key == "kind"
        ));
    }

    #[test]
    fn test_encode_unknown_variant() {
        let err = image_source().encode("video", &json!({})).unwrap_err();
        assert!(matches!(err, RuntimeError::PayloadEncodeFailure { ref variant, .. } if variant == "video"));
    }

    #[rstest]
    #[case(json!("just a string"))]
    #[case(json!([1, 2]))]
    #[case(json!(7))]
    fn test_encode_rejects_non_object_payload(#[case] payload: Value) {
        let err = encode_payload(&payload, "type", "ICON", "icon").unwrap_err();
        assert!(matches!(err, RuntimeError::PayloadEncodeFailure { .. }));
    }

    #[test]
    fn test_encode_rejects_payload_using_discriminator_key() {
        let payload = json!({"type": "svg", "iconURL": "u"});
        let err = encode_payload(&payload, "type", "ICON", "icon").unwrap_err();
        assert!(err.to_string().contains("discriminator key"), "{err}");
    }

    #[test]
    fn test_generate_rejects_collisions() {
        let schema = Schema::new(
            "ImageSource",
            vec![Variant::new("Icon", "Icon"), Variant::new("ICON", "Icon")],
        );
        let err = FlatCodec::generate(schema, &Config::with_rule(NamingRule::UpperCase)).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_codec_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlatCodec>();
    }
}
