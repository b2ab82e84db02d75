//! Editing of the variant and private-use sections.

use crate::error::{TagError, TagResult};
use crate::registry::{is_registered_variant, is_valid_private_use_token, is_well_known_private_use};

/// Name shown for the lookup entry meaning "my language is not in the list".
/// It never becomes a private-use token.
pub const UNLISTED_LANGUAGE_NAME_SENTINEL: &str = "Language Not Listed";

/// Splits a combined variant field such as `fonipa-x-etic` into its
/// variant and private-use tokens. Tokens before the `x` are variants.
#[must_use]
pub fn split_variant_and_private_use(field: &str) -> (Vec<String>, Vec<String>) {
    let mut variants = Vec::new();
    let mut private_use = Vec::new();
    let mut in_private_use = false;
    for token in field.split('-').filter(|t| !t.is_empty()) {
        if !in_private_use && token.eq_ignore_ascii_case("x") {
            in_private_use = true;
        } else if in_private_use {
            private_use.push(token.to_string());
        } else {
            variants.push(token.to_string());
        }
    }
    (variants, private_use)
}

/// Joins variant and private-use tokens into a combined variant field.
#[must_use]
pub fn concatenate_variant_and_private_use<V, P>(variants: &[V], private_use: &[P]) -> String
where
    V: AsRef<str>,
    P: AsRef<str>,
{
    let mut tokens: Vec<&str> = variants.iter().map(AsRef::as_ref).collect();
    if !private_use.is_empty() {
        tokens.push("x");
        tokens.extend(private_use.iter().map(AsRef::as_ref));
    }
    tokens.join("-")
}

/// Normalises a user-entered variant field.
///
/// Unregistered tokens in the variant section move to the private-use
/// section. Fails when a private-use token can never be valid.
pub fn to_valid_variant_string(field: &str) -> TagResult<String> {
    let normalized = field.replace(['_', ' ', ',', '.'], "-");
    let (variants, mut private_use) = split_variant_and_private_use(&normalized);

    let mut registered: Vec<String> = Vec::new();
    let mut moved: Vec<String> = Vec::new();
    for token in variants {
        if is_registered_variant(&token) {
            registered.push(token.to_ascii_lowercase());
        } else {
            moved.push(token);
        }
    }
    moved.append(&mut private_use);

    if let Some(bad) = moved.iter().find(|t| !is_valid_private_use_token(t)) {
        return Err(TagError::InvalidVariant(format!("{field} ({bad})")));
    }
    Ok(concatenate_variant_and_private_use(&registered, &moved))
}

/// Records an unlisted language's name as the leading private-use token.
///
/// The name is reduced to at most eight ASCII letters. If that token is
/// already present the field is returned unchanged. Otherwise the first
/// private-use token that is not a well-known marker is removed (it held a
/// previous name), and the new token is inserted at the front.
#[must_use]
pub fn insert_or_replace_private_use_token(variant_field: &str, language_name: &str) -> String {
    let token: String = language_name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(8)
        .collect();

    let (variants, mut private_use) = split_variant_and_private_use(variant_field);
    if !token.is_empty() && private_use.iter().any(|t| t.eq_ignore_ascii_case(&token)) {
        return variant_field.to_string();
    }

    if let Some(pos) = private_use.iter().position(|t| !is_well_known_private_use(t)) {
        private_use.remove(pos);
    }

    let name = language_name.trim();
    if !token.is_empty() && !name.is_empty() && name != UNLISTED_LANGUAGE_NAME_SENTINEL {
        private_use.insert(0, token);
    }

    concatenate_variant_and_private_use(&variants, &private_use)
}
