//! Naming engine for discriminator strings.
//!
//! Turns a variant identifier into the string written under the discriminator
//! key, following one of the eleven [`NamingRule`]s.
//!
//! ## Tokenization
//!
//! Word-based rules split the identifier into words in two passes:
//!
//! 1. At every non-alphanumeric character (`_`, `-`, punctuation, whitespace).
//!    Empty pieces are dropped, so `__icon__type` yields `icon`, `type`.
//! 2. At camel humps inside each piece. A new word starts at an uppercase letter
//!    that follows a lowercase letter or a digit (`iconType` -> `icon`, `Type`),
//!    and at the last uppercase letter of an acronym that is followed by a
//!    lowercase letter (`XMLParser` -> `XML`, `Parser`). Digits stay with the
//!    letters before them (`Mp4Video` -> `Mp4`, `Video`).
//!
//! `upperCase`, `lowerCase` and `sameAsCaseName` never tokenize.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Convention used to render a variant identifier as its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingRule {
    /// `iconType` -> `ICONTYPE`
    UpperCase,
    /// `iconType` -> `icontype`
    LowerCase,
    /// `icon_type` -> `iconType`
    LowerCamelCase,
    /// `icon_type` -> `IconType`
    UpperCamelCase,
    /// `IconType` -> `icon_type`
    LowerSnakeCase,
    /// `IconType` -> `Icon_Type`
    MixSnakeCase,
    /// `IconType` -> `ICON_TYPE`
    UpperSnakeCase,
    /// `IconType` -> `icon-type`
    LowerKebabCase,
    /// `IconType` -> `Icon-Type`
    MixedKebabCase,
    /// `IconType` -> `ICON-TYPE`
    UpperKebabCase,
    /// identifier unchanged
    SameAsCaseName,
}

impl NamingRule {
    pub const ALL: [Self; 11] = [
        Self::UpperCase,
        Self::LowerCase,
        Self::LowerCamelCase,
        Self::UpperCamelCase,
        Self::LowerSnakeCase,
        Self::MixSnakeCase,
        Self::UpperSnakeCase,
        Self::LowerKebabCase,
        Self::MixedKebabCase,
        Self::UpperKebabCase,
        Self::SameAsCaseName,
    ];

    /// The rule's canonical name, as accepted by `type_parse_rule`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpperCase => "upperCase",
            Self::LowerCase => "lowerCase",
            Self::LowerCamelCase => "lowerCamelCase",
            Self::UpperCamelCase => "upperCamelCase",
            Self::LowerSnakeCase => "lowerSnakeCase",
            Self::MixSnakeCase => "mixSnakeCase",
            Self::UpperSnakeCase => "upperSnakeCase",
            Self::LowerKebabCase => "lowerKebabCase",
            Self::MixedKebabCase => "mixedKebabCase",
            Self::UpperKebabCase => "upperKebabCase",
            Self::SameAsCaseName => "sameAsCaseName",
        }
    }

    /// Render `identifier` under this rule. Shorthand for [`render`].
    #[must_use]
    pub fn apply(self, identifier: &str) -> String {
        render(identifier, self)
    }
}

impl fmt::Display for NamingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingRule {
    type Err = SchemaError;

    /// Accepts the canonical name (`upperSnakeCase`), its member-access form
    /// (`.upperSnakeCase`) and the Rust variant name (`UpperSnakeCase`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().strip_prefix('.').unwrap_or(s.trim());
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == name || capitalize_first(rule.as_str()) == name)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|rule| rule.as_str()).collect();
                SchemaError::InvalidConfiguration(format!(
                    "unknown naming rule `{s}`, expected one of: {}",
                    expected.join(", ")
                ))
            })
    }
}

/// Strips the `r#` prefix from raw identifiers.
/// E.g., `r#type` becomes `type`.
#[must_use]
pub fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Capitalizes the first character of a string, leaving the rest untouched.
/// E.g., `user` -> `User`, `USER` -> `USER`, `` -> ``
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// First letter uppercased, everything after it lowercased.
/// E.g., `icon` -> `Icon`, `URL` -> `Url`
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Split an identifier into words. See the module docs for the exact policy.
#[must_use]
pub fn words(identifier: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for piece in identifier
        .split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
    {
        split_humps(piece, &mut words);
    }
    words
}

fn split_humps<'a>(piece: &'a str, words: &mut Vec<&'a str>) {
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, ch) = chars[i];
        if !ch.is_uppercase() {
            continue;
        }
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());
        // "iconType" -> 'T'; "XMLParser" -> 'P'
        let starts_word =
            prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower);
        if starts_word {
            words.push(&piece[start..offset]);
            start = offset;
        }
    }

    words.push(&piece[start..]);
}

fn join_words(identifier: &str, separator: &str, transform: impl Fn(&str) -> String) -> String {
    words(identifier)
        .into_iter()
        .map(transform)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render `identifier` under `rule`.
///
/// Total: never fails, and an empty identifier renders to an empty string under
/// every rule.
#[must_use]
pub fn render(identifier: &str, rule: NamingRule) -> String {
    match rule {
        NamingRule::UpperCase => identifier.to_uppercase(),
        NamingRule::LowerCase => identifier.to_lowercase(),
        NamingRule::SameAsCaseName => identifier.to_string(),
        NamingRule::LowerCamelCase => {
            let mut result = String::with_capacity(identifier.len());
            for (i, word) in words(identifier).into_iter().enumerate() {
                if i == 0 {
                    result.push_str(&word.to_lowercase());
                } else {
                    result.push_str(&capitalize_word(word));
                }
            }
            result
        }
        NamingRule::UpperCamelCase => words(identifier)
            .into_iter()
            .map(capitalize_word)
            .collect(),
        NamingRule::LowerSnakeCase => join_words(identifier, "_", str::to_lowercase),
        NamingRule::UpperSnakeCase => join_words(identifier, "_", str::to_uppercase),
        NamingRule::MixSnakeCase => join_words(identifier, "_", str::to_string),
        NamingRule::LowerKebabCase => join_words(identifier, "-", str::to_lowercase),
        NamingRule::UpperKebabCase => join_words(identifier, "-", str::to_uppercase),
        NamingRule::MixedKebabCase => join_words(identifier, "-", str::to_string),
    }
}
