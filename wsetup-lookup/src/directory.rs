//! Language directory capability and an in-memory inventory.

use std::cmp::Ordering;

use crate::candidate::LanguageCandidate;
use crate::error::LookupResult;

/// Source of language candidates for free-text queries.
pub trait LanguageDirectory {
    /// Candidates matching `query`, best match first.
    fn suggest(&self, query: &str) -> LookupResult<Vec<LanguageCandidate>>;
}

/// In-memory language inventory.
///
/// A query matches an entry when the entry's tag, one of its names or one of
/// its countries starts with the query (case-insensitive). The query `*`
/// matches everything.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    entries: Vec<LanguageCandidate>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new(entries: Vec<LanguageCandidate>) -> Self {
        Self { entries }
    }

    pub fn add(&mut self, entry: LanguageCandidate) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn starts_with_ci(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn matches(entry: &LanguageCandidate, query: &str) -> bool {
    starts_with_ci(&entry.language_tag, query)
        || entry.names.iter().any(|n| starts_with_ci(n, query))
        || entry.countries.iter().any(|c| starts_with_ci(c, query))
}

/// Lower is better.
fn relevance(entry: &LanguageCandidate, query: &str) -> u8 {
    let language_part = entry.language_tag.split('-').next().unwrap_or_default();
    if entry.primary_name().eq_ignore_ascii_case(query) {
        0
    } else if entry.names.iter().any(|n| n.eq_ignore_ascii_case(query)) {
        1
    } else if entry.language_tag.eq_ignore_ascii_case(query) {
        2
    } else if language_part.eq_ignore_ascii_case(query) {
        3
    } else if entry.primary_country().eq_ignore_ascii_case(query) {
        4
    } else {
        5
    }
}

fn compare(a: &LanguageCandidate, b: &LanguageCandidate, query: &str) -> Ordering {
    relevance(a, query)
        .cmp(&relevance(b, query))
        .then_with(|| a.primary_name().to_lowercase().cmp(&b.primary_name().to_lowercase()))
        .then_with(|| a.language_tag.cmp(&b.language_tag))
}

impl LanguageDirectory for MemoryDirectory {
    fn suggest(&self, query: &str) -> LookupResult<Vec<LanguageCandidate>> {
        let query = query.trim();
        if query == "*" {
            let mut all = self.entries.clone();
            all.sort_by(|a, b| compare(a, b, ""));
            return Ok(all);
        }
        let mut found: Vec<LanguageCandidate> = self
            .entries
            .iter()
            .filter(|e| matches(e, query))
            .cloned()
            .collect();
        found.sort_by(|a, b| compare(a, b, query));
        Ok(found)
    }
}
