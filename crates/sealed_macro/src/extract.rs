//! Turns a `syn` enum declaration into a validated schema.
//!
//! The declaration is first lowered to a [`Declaration`] and validated by
//! [`Schema::extract`]; errors are then re-attached to the span of the variant
//! they name. On success each variant is paired with the `syn` pieces the code
//! generator needs.

use quote::ToTokens;
use sealed_core::{Alternative, Declaration, DeclarationKind, Schema, SchemaError};

/// How the single payload field is written in the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadBinding {
    /// `Image(Image)`
    Unnamed,
    /// `Image { image: Image }`
    Named(syn::Ident),
}

/// A validated variant together with its `syn` representation.
#[derive(Debug, Clone)]
pub struct PayloadVariant {
    pub ident: syn::Ident,
    /// Variant name as used in the schema, without any `r#` prefix
    pub name: String,
    pub binding: PayloadBinding,
    pub ty: syn::Type,
}

fn type_text(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string()
}

/// Lower a derive input to the raw declaration form.
pub fn declaration_of(input: &syn::DeriveInput) -> Declaration {
    let (kind, alternatives) = match &input.data {
        syn::Data::Enum(data) => (
            DeclarationKind::Enum,
            data.variants
                .iter()
                .map(|variant| {
                    Alternative::new(
                        variant.ident.to_string(),
                        variant.fields.iter().map(|field| type_text(&field.ty)).collect(),
                    )
                })
                .collect(),
        ),
        syn::Data::Struct(_) => (DeclarationKind::Struct, Vec::new()),
        syn::Data::Union(_) => (DeclarationKind::Union, Vec::new()),
    };

    Declaration {
        name: input.ident.to_string(),
        kind,
        alternatives,
    }
}

fn schema_error_to_syn(input: &syn::DeriveInput, err: &SchemaError) -> syn::Error {
    let offending = match err {
        SchemaError::VariantMissingPayload(name)
        | SchemaError::VariantHasMultiplePayloads { variant: name, .. } => match &input.data {
            syn::Data::Enum(data) => data.variants.iter().find(|variant| {
                sealed_core::naming::strip_raw_prefix(&variant.ident.to_string()) == name
            }),
            _ => None,
        },
        _ => None,
    };

    match offending {
        Some(variant) => syn::Error::new_spanned(variant, err.to_string()),
        None => syn::Error::new_spanned(&input.ident, err.to_string()),
    }
}

fn payload_variant(variant: &syn::Variant, name: String) -> syn::Result<PayloadVariant> {
    let Some(field) = variant.fields.iter().next() else {
        return Err(syn::Error::new_spanned(
            variant,
            SchemaError::VariantMissingPayload(name).to_string(),
        ));
    };

    let binding = match &field.ident {
        Some(ident) => PayloadBinding::Named(ident.clone()),
        None => PayloadBinding::Unnamed,
    };

    Ok(PayloadVariant {
        ident: variant.ident.clone(),
        name,
        binding,
        ty: field.ty.clone(),
    })
}

/// Validate `input` and return its schema plus one [`PayloadVariant`] per
/// schema variant, in the same order.
pub fn extract_variants(input: &syn::DeriveInput) -> syn::Result<(Schema, Vec<PayloadVariant>)> {
    let declaration = declaration_of(input);
    let schema = Schema::extract(&declaration).map_err(|err| schema_error_to_syn(input, &err))?;

    let variants = match &input.data {
        syn::Data::Enum(data) => data
            .variants
            .iter()
            .zip(&schema.variants)
            .map(|(variant, schema_variant)| payload_variant(variant, schema_variant.name.clone()))
            .collect::<syn::Result<Vec<_>>>()?,
        _ => Vec::new(),
    };

    Ok((schema, variants))
}
