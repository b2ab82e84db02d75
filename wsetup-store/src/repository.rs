//! The repository capability.

use wsetup_model::{DefinitionId, WritingSystemDefinition};
use wsetup_tag::{TagParts, UNLISTED_LANGUAGE};

use crate::error::StoreResult;

/// Abbreviation given to definitions made by [`WritingSystemRepository::create`].
pub const DEFAULT_NEW_ABBREVIATION: &str = "New";

/// Storage for writing system definitions.
///
/// Tags are unique within a repository (case-insensitive). Definitions are
/// recognised across tag changes by their [`DefinitionId`].
pub trait WritingSystemRepository {
    /// Tags of every stored definition.
    fn all_tags(&self) -> Vec<String>;

    /// Copies of every stored definition, in storage order.
    fn all_definitions(&self) -> Vec<WritingSystemDefinition>;

    /// Whether a definition with this identity is stored.
    fn contains_id(&self, id: DefinitionId) -> bool;

    /// Whether `definition` may be stored: no *other* stored definition
    /// uses its tag.
    fn can_set(&self, definition: &WritingSystemDefinition) -> bool;

    /// Stores `definition`, replacing any earlier version with the same identity.
    fn set(&mut self, definition: &WritingSystemDefinition) -> StoreResult<()>;

    /// Removes the definition with this identity.
    fn remove(&mut self, id: DefinitionId) -> StoreResult<()>;

    /// Merges the definition tagged `source_tag` into `target_tag` and removes
    /// the source.
    fn conflate(&mut self, source_tag: &str, target_tag: &str) -> StoreResult<()>;

    /// Persists pending changes.
    fn save(&mut self) -> StoreResult<()>;

    /// Whether a definition with this tag is stored (case-insensitive).
    fn contains_tag(&self, tag: &str) -> bool {
        self.all_tags().iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// The stored definition with this tag, if any.
    fn get(&self, tag: &str) -> Option<WritingSystemDefinition> {
        self.all_definitions()
            .into_iter()
            .find(|d| d.language_tag().eq_ignore_ascii_case(tag))
    }

    /// A new, unstored definition for an unlisted language.
    fn create(&self) -> WritingSystemDefinition {
        let mut definition = WritingSystemDefinition::from_parts(TagParts::language_only(UNLISTED_LANGUAGE));
        definition.abbreviation = DEFAULT_NEW_ABBREVIATION.to_string();
        definition
    }
}
