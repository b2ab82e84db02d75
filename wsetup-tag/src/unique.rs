//! Tag uniqueness.

use std::collections::HashSet;

use crate::error::{TagError, TagResult};
use crate::parts::TagParts;

const DUPLICATE_PREFIX: &str = "dupl";

/// Largest `N` whose `duplN` still fits in an 8-character private-use token.
const MAX_DUPLICATE_NUMBER: usize = 9999;

/// Whether a private-use token is a `duplN` marker added by [`to_unique_tag`].
#[must_use]
pub fn is_duplicate_marker(token: &str) -> bool {
    match (token.get(..DUPLICATE_PREFIX.len()), token.get(DUPLICATE_PREFIX.len()..)) {
        (Some(prefix), Some(number)) => {
            prefix.eq_ignore_ascii_case(DUPLICATE_PREFIX)
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Returns `candidate` if no entry of `existing` equals it
/// (case-insensitively). Otherwise returns it with a `duplN` private-use
/// marker, using the smallest `N` that makes it unique.
///
/// Trailing markers already on the candidate are replaced rather than
/// stacked, so duplicating a duplicate yields `...-x-dupl1`, not
/// `...-x-dupl0-dupl0`. There are never more than `existing.len() + 1`
/// attempts, and none past `dupl9999`.
pub fn to_unique_tag<S: AsRef<str>>(candidate: &str, existing: &[S]) -> TagResult<String> {
    let mut parts =
        TagParts::parse(candidate).ok_or_else(|| TagError::InvalidTag(candidate.to_string()))?;

    let taken: HashSet<String> = existing
        .iter()
        .map(|t| t.as_ref().to_ascii_lowercase())
        .collect();
    if !taken.contains(&candidate.to_ascii_lowercase()) {
        return Ok(candidate.to_string());
    }

    while parts.private_use.last().is_some_and(|t| is_duplicate_marker(t)) {
        parts.private_use.pop();
    }

    for n in 0..=taken.len().min(MAX_DUPLICATE_NUMBER) {
        parts.private_use.push(format!("{DUPLICATE_PREFIX}{n}"));
        let tag = parts.to_string();
        if !taken.contains(&tag.to_ascii_lowercase()) {
            return Ok(tag);
        }
        parts.private_use.pop();
    }

    Err(TagError::UniquenessExhausted(candidate.to_string()))
}
