//! `#[sealed(...)]` container attribute parsing.
//!
//! ```ignore
//! #[derive(Sealed)]
//! #[sealed(type_key = "kind", type_parse_rule = "upperSnakeCase")]
//! enum ImageSource { ... }
//! ```
//!
//! `type_key` defaults to `"type"`; `type_parse_rule` is required and accepts a
//! string literal or a path whose last segment names the rule
//! (`upperCase`, `NamingRule::UpperCase`).

use sealed_core::{Config, DEFAULT_DISCRIMINATOR_KEY, NamingRule, SchemaError};

fn invalid(reason: impl Into<String>) -> String {
    SchemaError::InvalidConfiguration(reason.into()).to_string()
}

fn parse_rule_expr(expr: &syn::Expr) -> syn::Result<NamingRule> {
    let name = match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(s),
            ..
        }) => s.value(),
        syn::Expr::Path(expr_path) => match expr_path.path.segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => {
                return Err(syn::Error::new_spanned(
                    expr,
                    invalid("`type_parse_rule` must name a naming rule"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                expr,
                invalid("`type_parse_rule` must be a string literal or a rule name"),
            ));
        }
    };

    name.parse::<NamingRule>()
        .map_err(|err| syn::Error::new_spanned(expr, err.to_string()))
}

/// Read the generation config from the `#[sealed]` attributes of `ident`'s
/// declaration. Several `#[sealed]` attributes are merged.
pub fn parse_sealed_args(attrs: &[syn::Attribute], ident: &syn::Ident) -> syn::Result<Config> {
    let mut type_key: Option<syn::LitStr> = None;
    let mut rule: Option<NamingRule> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sealed")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_key") {
                if type_key.is_some() {
                    return Err(meta.error(invalid("duplicate `type_key`")));
                }
                let lit: syn::LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(
                        &lit,
                        invalid("`type_key` must not be empty"),
                    ));
                }
                type_key = Some(lit);
                Ok(())
            } else if meta.path.is_ident("type_parse_rule") {
                if rule.is_some() {
                    return Err(meta.error(invalid("duplicate `type_parse_rule`")));
                }
                let expr: syn::Expr = meta.value()?.parse()?;
                rule = Some(parse_rule_expr(&expr)?);
                Ok(())
            } else {
                let path = meta
                    .path
                    .get_ident()
                    .map_or_else(|| "?".to_string(), ToString::to_string);
                Err(meta.error(invalid(format!(
                    "unknown option `{path}`, expected `type_key` or `type_parse_rule`"
                ))))
            }
        })?;
    }

    let Some(naming_rule) = rule else {
        return Err(syn::Error::new_spanned(
            ident,
            invalid(
                "missing `type_parse_rule`, add e.g. `#[sealed(type_parse_rule = \"upperCase\")]`",
            ),
        ));
    };

    let discriminator_key = type_key.map_or_else(
        || DEFAULT_DISCRIMINATOR_KEY.to_string(),
        |lit| lit.value(),
    );

    Ok(Config::new(discriminator_key, naming_rule))
}
