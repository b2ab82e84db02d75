//! Shared test helpers for repository tests.

#![allow(dead_code)]

use wsetup_model::WritingSystemDefinition;

/// A definition for `tag` with an abbreviation derived from it.
pub fn make_definition(tag: &str) -> WritingSystemDefinition {
    let mut definition = WritingSystemDefinition::new(tag).unwrap();
    definition.abbreviation = tag.to_uppercase();
    definition
}

/// Sorted tags, for order-insensitive comparisons.
pub fn sorted(mut tags: Vec<String>) -> Vec<String> {
    tags.sort();
    tags
}
