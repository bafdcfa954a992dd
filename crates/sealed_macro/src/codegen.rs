//! Code generation for `#[derive(Sealed)]`.
//!
//! Emits three impls for the annotated enum:
//!
//! - `sealed::Sealed`, holding the discriminator key, the wire mapping and the
//!   flat `decode_flat` / `encode_flat` routines,
//! - `serde::Serialize`, encoding through `encode_flat`,
//! - `serde::Deserialize`, buffering the input as a `serde_json::Value` and
//!   decoding through `decode_flat`.
//!
//! Every generated path goes through `::sealed`, so users only depend on the
//! facade crate.

use proc_macro2::TokenStream;
use quote::quote;
use sealed_core::{Config, WireMapping};

use crate::extract::{PayloadBinding, PayloadVariant};

/// Add `bound` to every type parameter of `generics`.
fn with_bound(generics: &syn::Generics, bound: &TokenStream) -> syn::Generics {
    let mut generics = generics.clone();
    let params: Vec<syn::Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause
            .predicates
            .push(syn::parse_quote!(#ident: #bound));
    }
    generics
}

/// Pattern binding the payload of `variant` by reference as `__payload`.
fn payload_pattern(variant: &PayloadVariant) -> TokenStream {
    let ident = &variant.ident;
    match &variant.binding {
        PayloadBinding::Unnamed => quote! { Self::#ident(ref __payload) },
        PayloadBinding::Named(field) => quote! { Self::#ident { #field: ref __payload } },
    }
}

/// Pattern matching `variant` without binding anything.
fn wildcard_pattern(variant: &PayloadVariant) -> TokenStream {
    let ident = &variant.ident;
    match &variant.binding {
        PayloadBinding::Unnamed => quote! { Self::#ident(..) },
        PayloadBinding::Named(_) => quote! { Self::#ident { .. } },
    }
}

/// Expression constructing `variant` around `payload`.
fn construct(variant: &PayloadVariant, payload: TokenStream) -> TokenStream {
    let ident = &variant.ident;
    match &variant.binding {
        PayloadBinding::Unnamed => quote! { Self::#ident(#payload) },
        PayloadBinding::Named(field) => quote! { Self::#ident { #field: #payload } },
    }
}

/// Generate the codec impls for `input`.
///
/// `variants` and `mapping` must come from the same schema, so they line up
/// one to one in declaration order.
pub fn generate_codec(
    input: &syn::DeriveInput,
    config: &Config,
    mapping: &WireMapping,
    variants: &[PayloadVariant],
) -> TokenStream {
    let name = &input.ident;
    let key = config.discriminator_key.as_str();

    let mapping_entries: Vec<TokenStream> = mapping
        .iter()
        .map(|(variant, wire)| quote! { (#variant, #wire) })
        .collect();

    let mut discriminator_arms = Vec::with_capacity(variants.len());
    let mut decode_arms = Vec::with_capacity(variants.len());
    let mut encode_arms = Vec::with_capacity(variants.len());

    for (variant, (variant_name, wire)) in variants.iter().zip(mapping.iter()) {
        let ty = &variant.ty;

        let wildcard = wildcard_pattern(variant);
        discriminator_arms.push(quote! { #wildcard => #wire, });

        let decoded = construct(
            variant,
            quote! { ::sealed::codec::decode_payload::<#ty>(__value, #variant_name)? },
        );
        decode_arms.push(quote! {
            #wire => ::core::result::Result::Ok(#decoded),
        });

        let pattern = payload_pattern(variant);
        encode_arms.push(quote! {
            #pattern => ::sealed::codec::encode_payload(
                __payload,
                <Self as ::sealed::Sealed>::DISCRIMINATOR_KEY,
                #wire,
                #variant_name,
            ),
        });
    }

    let sealed_generics = with_bound(
        &input.generics,
        &quote! { ::sealed::__private::serde::Serialize + ::sealed::__private::serde::de::DeserializeOwned },
    );
    let (impl_generics, ty_generics, where_clause) = sealed_generics.split_for_impl();

    // The serde impls go through `Sealed`, so they carry its bounds too.
    let mut de_generics = sealed_generics.clone();
    de_generics.params.insert(0, syn::parse_quote!('de));
    let (de_impl_generics, _, de_where_clause) = de_generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics ::sealed::Sealed for #name #ty_generics #where_clause {
            const DISCRIMINATOR_KEY: &'static str = #key;

            const WIRE_MAPPING: &'static [(&'static str, &'static str)] = &[#(#mapping_entries),*];

            fn discriminator(&self) -> &'static str {
                match *self {
                    #(#discriminator_arms)*
                }
            }

            fn decode_flat(
                __value: ::sealed::__private::serde_json::Value,
            ) -> ::core::result::Result<Self, ::sealed::RuntimeError> {
                let __discriminator = ::sealed::codec::read_discriminator(
                    &__value,
                    <Self as ::sealed::Sealed>::DISCRIMINATOR_KEY,
                )?
                .to_owned();
                match __discriminator.as_str() {
                    #(#decode_arms)*
                    __other => ::core::result::Result::Err(::sealed::codec::unknown_discriminator(
                        <Self as ::sealed::Sealed>::DISCRIMINATOR_KEY,
                        __other,
                    )),
                }
            }

            fn encode_flat(
                &self,
            ) -> ::core::result::Result<::sealed::__private::serde_json::Value, ::sealed::RuntimeError> {
                match *self {
                    #(#encode_arms)*
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics ::sealed::__private::serde::Serialize for #name #ty_generics #where_clause {
            fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: ::sealed::__private::serde::Serializer,
            {
                let __value = ::sealed::Sealed::encode_flat(self)
                    .map_err(<__S::Error as ::sealed::__private::serde::ser::Error>::custom)?;
                ::sealed::__private::serde::Serialize::serialize(&__value, __serializer)
            }
        }

        #[automatically_derived]
        impl #de_impl_generics ::sealed::__private::serde::Deserialize<'de> for #name #ty_generics #de_where_clause {
            fn deserialize<__D>(__deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: ::sealed::__private::serde::Deserializer<'de>,
            {
                let __value = <::sealed::__private::serde_json::Value as ::sealed::__private::serde::Deserialize>::deserialize(__deserializer)?;
                <Self as ::sealed::Sealed>::decode_flat(__value)
                    .map_err(<__D::Error as ::sealed::__private::serde::de::Error>::custom)
            }
        }
    }
}
