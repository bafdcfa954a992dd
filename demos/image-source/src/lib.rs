//! Image sources as sent by a design-system backend.
//!
//! Each source is a flat object: the `type` field selects the variant and the
//! remaining fields belong to that variant's payload.

use sealed::{Config, FlatCodec, NamingRule, Schema, Sealed, SchemaError, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lottie {
    #[serde(rename = "lottieURL")]
    pub lottie_url: String,
    #[serde(default)]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "iconURL")]
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Sealed)]
#[sealed(type_parse_rule = "upperCase")]
pub enum ImageSource {
    Image(Image),
    Lottie(Lottie),
    Icon(Icon),
}

/// Same payloads under a custom discriminator key and multi-word variants.
#[derive(Debug, Clone, PartialEq, Sealed)]
#[sealed(type_key = "kind", type_parse_rule = NamingRule::UpperSnakeCase)]
pub enum Media {
    IconType(Icon),
    LottieAnimation(Lottie),
    XMLImage(Image),
}

/// Variants may name their payload field; the name never reaches the wire.
#[derive(Debug, Clone, PartialEq, Sealed)]
#[sealed(type_parse_rule = "lowerKebabCase")]
pub enum Thumbnail {
    StaticImage { image: Image },
    AnimatedIcon { icon: Icon },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Sealed)]
#[sealed(type_key = "status", type_parse_rule = "lowerCase")]
pub enum Envelope<T> {
    Ok(Page<T>),
    Error(Failure),
}

/// Runtime codec equivalent to the derived `ImageSource` codec.
pub fn image_source_codec() -> Result<FlatCodec, SchemaError> {
    let schema = Schema::new(
        "ImageSource",
        vec![
            Variant::new("Image", "Image"),
            Variant::new("Lottie", "Lottie"),
            Variant::new("Icon", "Icon"),
        ],
    );
    FlatCodec::generate(schema, &Config::with_rule(NamingRule::UpperCase))
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Image(image) => &image.image_url,
            Self::Lottie(lottie) => &lottie.lottie_url,
            Self::Icon(icon) => &icon.icon_url,
        }
    }
}

