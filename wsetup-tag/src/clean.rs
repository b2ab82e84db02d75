//! Best-effort repair of user-entered tag fields.
//!
//! Nothing the user typed is silently dropped. A token that cannot stay in
//! its field is moved into the private-use section and, where the field is
//! mandatory for the moved token to keep its meaning, replaced by the
//! private-use placeholder (`qaa`, `Qaaa` or `QM`).

use crate::parts::TagParts;
use crate::registry::{
    is_registered_variant, is_valid_language_code, is_valid_region_code, is_valid_script_code,
    title_case,
};
use crate::{PRIVATE_USE_REGION, PRIVATE_USE_SCRIPT, UNLISTED_LANGUAGE};

/// Cleans the five tag fields and composes the result.
#[must_use]
pub fn clean_tag(
    language: &str,
    script: &str,
    region: &str,
    variant: &str,
    private_use: &str,
) -> String {
    clean_tag_parts(language, script, region, variant, private_use).to_string()
}

/// Cleans a whole tag string, classifying its tokens by position and shape.
///
/// The first token is the language. An immediately following four-letter
/// token is the script and the next two-letter or three-digit token the
/// region. Everything else is handed to the variant field.
#[must_use]
pub fn clean_tag_string(tag: &str) -> String {
    let tokens = tokenize(tag);
    let mut iter = tokens.iter().map(String::as_str).peekable();
    let language = iter.next().unwrap_or_default();
    let script = iter.next_if(|t| is_valid_script_code(t)).unwrap_or_default();
    let region = iter.next_if(|t| is_valid_region_code(t)).unwrap_or_default();
    let rest: Vec<&str> = iter.collect();
    clean_tag(language, script, region, &rest.join("-"), "")
}

/// Cleans the five tag fields into structured parts.
#[must_use]
pub fn clean_tag_parts(
    language: &str,
    script: &str,
    region: &str,
    variant: &str,
    private_use: &str,
) -> TagParts {
    let mut moved: Vec<String> = Vec::new();

    let language_tokens = split_off_private_use(tokenize(language), &mut moved);
    let script_tokens = split_off_private_use(tokenize(script), &mut moved);
    let region_tokens = split_off_private_use(tokenize(region), &mut moved);
    let variant_tokens = split_off_private_use(tokenize(variant), &mut moved);

    let mut parts = TagParts::default();
    // Tokens moved by a field's own repair go first, in field order.
    let mut private: Vec<String> = Vec::new();

    let mut language_iter = language_tokens.into_iter();
    if let Some(first) = language_iter.next() {
        if is_valid_language_code(&first) {
            parts.language = first.to_ascii_lowercase();
        } else {
            parts.language = UNLISTED_LANGUAGE.to_string();
            private.push(first);
        }
    }
    private.extend(language_iter);

    let mut script_iter = script_tokens.into_iter();
    if let Some(first) = script_iter.next() {
        if is_valid_script_code(&first) {
            parts.script = Some(title_case(&first));
        } else {
            parts.script = Some(PRIVATE_USE_SCRIPT.to_string());
            private.push(first);
        }
    }
    private.extend(script_iter);

    let mut region_iter = region_tokens.into_iter();
    if let Some(first) = region_iter.next() {
        if is_valid_region_code(&first) {
            parts.region = Some(first.to_ascii_uppercase());
        } else {
            parts.region = Some(PRIVATE_USE_REGION.to_string());
            private.push(first);
        }
    }
    private.extend(region_iter);

    for token in variant_tokens {
        if is_registered_variant(&token) {
            if !parts.has_variant(&token) {
                parts.variants.push(token.to_ascii_lowercase());
            }
        } else {
            private.push(token);
        }
    }

    private.extend(moved);
    private.extend(tokenize(private_use));

    for token in private {
        let cleaned: String = token
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(8)
            .collect();
        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("x") || parts.has_private_use(&cleaned)
        {
            continue;
        }
        parts.private_use.push(cleaned);
    }

    if parts.language.is_empty() {
        parts.language = UNLISTED_LANGUAGE.to_string();
    }
    parts
}

/// Splits a field on any separator the user might have typed.
fn tokenize(field: &str) -> Vec<String> {
    field
        .split(|c: char| c == '-' || c == '_' || c == ',' || c == '.' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the tokens before a literal `x`. Tokens after it go to `moved`.
fn split_off_private_use(tokens: Vec<String>, moved: &mut Vec<String>) -> Vec<String> {
    match tokens.iter().position(|t| t.eq_ignore_ascii_case("x")) {
        Some(pos) => {
            let mut kept = tokens;
            let tail = kept.split_off(pos);
            moved.extend(tail.into_iter().skip(1));
            kept
        }
        None => tokens,
    }
}
