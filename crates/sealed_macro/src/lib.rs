//! Derive macro for `sealed`.
//!
//! `#[derive(Sealed)]` turns an enum whose variants each wrap one payload into a
//! flat-tagged codec: the discriminator sits next to the payload's own fields.
//!
//! ```ignore
//! use sealed::Sealed;
//!
//! #[derive(Sealed)]
//! #[sealed(type_parse_rule = "upperCase")]
//! enum ImageSource {
//!     Image(Image),
//!     Lottie(Lottie),
//!     Icon(Icon),
//! }
//!
//! // {"type": "ICON", "iconURL": "https://github.com/icons"}
//! ```

mod args;
mod codegen;
mod extract;
mod sealed_impl;

use proc_macro::TokenStream;

/// Derive `sealed::Sealed`, `serde::Serialize` and `serde::Deserialize`.
///
/// Options, on the enum:
/// - `type_key = "..."`: discriminator field, default `"type"`
/// - `type_parse_rule = "..."`: naming rule for discriminator values, required
#[proc_macro_derive(Sealed, attributes(sealed))]
pub fn derive_sealed(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match sealed_impl::process_derive_sealed(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
