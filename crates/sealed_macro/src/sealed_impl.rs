//! `#[derive(Sealed)]` implementation.
//!
//! Runs the generation pipeline on one enum declaration:
//!
//! 1. [`extract_variants`] validates the declaration into a schema,
//! 2. [`parse_sealed_args`] reads the `#[sealed(...)]` config,
//! 3. [`WireMapping::build`] renders and checks every discriminator,
//! 4. [`generate_codec`] emits the impls.
//!
//! Any failure aborts the whole expansion; nothing is emitted except the
//! compile error.

use proc_macro2::TokenStream;
use sealed_core::WireMapping;

use crate::args::parse_sealed_args;
use crate::codegen::generate_codec;
use crate::extract::extract_variants;

/// Process derive input and return the expanded impls.
pub fn process_derive_sealed(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let (schema, variants) = extract_variants(input)?;
    let config = parse_sealed_args(&input.attrs, &input.ident)?;
    let mapping = WireMapping::build(&schema, &config)
        .map_err(|err| syn::Error::new_spanned(&input.ident, err.to_string()))?;
    Ok(generate_codec(input, &config, &mapping, &variants))
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use rstest::rstest;

    use super::*;

    fn process(src: &str) -> syn::Result<TokenStream> {
        let input: syn::DeriveInput = syn::parse_str(src).unwrap();
        process_derive_sealed(&input)
    }

    #[test]
    fn test_process_image_source() {
        let output = process(
            r#"
            #[sealed(type_parse_rule = "upperCase")]
            pub enum ImageSource {
                Image(Image),
                Lottie(Lottie),
                Icon(Icon),
            }
            "#,
        )
        .unwrap()
        .to_string();

        assert!(output.contains("\"IMAGE\""));
        assert!(output.contains("\"LOTTIE\""));
        assert!(output.contains("\"ICON\""));
    }

    #[rstest]
    #[case(
        r#"
        #[sealed(type_parse_rule = "lowerCase")]
        enum ImageSource { Image(Image), Lottie(Lottie), Icon }
        "#,
        "variant `Icon` has no payload"
    )]
    #[case(
        r#"
        #[sealed(type_parse_rule = "lowerCase")]
        struct Icon { url: String }
        "#,
        "`Icon` is not a sum type"
    )]
    #[case(
        r#"
        #[sealed(type_parse_rule = "upperSnakeCase")]
        enum Media { IconType(Icon), Icon_Type(Icon) }
        "#,
        "both render to discriminator `ICON_TYPE`"
    )]
    #[case(
        r#"
        enum ImageSource { Image(Image) }
        "#,
        "missing `type_parse_rule`"
    )]
    #[case(
        r#"
        #[sealed(type_parse_rule = "lowerSnakeCase")]
        enum Odd { __(u8) }
        "#,
        "renders to an empty discriminator"
    )]
    fn test_process_rejects(#[case] src: &str, #[case] expected: &str) {
        let err = process(src).unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_schema_errors_win_over_config_errors() {
        let err = process("enum ImageSource { Icon }").unwrap_err();
        assert!(err.to_string().contains("has no payload"), "{err}");
    }

    #[test]
    fn test_failed_expansion_emits_only_the_error() {
        let err = process("enum ImageSource { Icon }").unwrap_err();
        let tokens = err.to_compile_error().to_string();
        assert!(tokens.contains("compile_error"));
        assert!(!tokens.contains("decode_flat"));
    }

    #[test]
    fn test_collision_message() {
        let err = process(
            r#"
            #[sealed(type_parse_rule = "lowerCase")]
            enum Media { IconType(Icon), Icontype(Icon) }
            "#,
        )
        .unwrap_err();

        assert_snapshot!(err.to_string(), @"invalid configuration: variants `IconType` and `Icontype` both render to discriminator `icontype` under `lowerCase`");
    }
}
