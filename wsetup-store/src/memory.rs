//! In-memory repository.

use chrono::Utc;
use tracing::{debug, info};
use wsetup_model::{DefinitionId, WritingSystemDefinition};

use crate::error::{StoreError, StoreResult};
use crate::repository::WritingSystemRepository;

/// A conflation performed through [`WritingSystemRepository::conflate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflation {
    pub source_tag: String,
    pub target_tag: String,
}

/// Repository that keeps definitions in memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    definitions: Vec<WritingSystemDefinition>,
    conflations: Vec<Conflation>,
    save_count: usize,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::default()
    }

    /// Creates a repository holding `definitions`, which must have distinct tags.
    pub fn with_definitions(definitions: Vec<WritingSystemDefinition>) -> StoreResult<Self> {
        let mut repo = Self::default();
        for definition in &definitions {
            repo.set(definition)?;
        }
        Ok(repo)
    }

    /// Conflations performed so far, oldest first.
    #[must_use]
    pub fn conflations(&self) -> &[Conflation] {
        &self.conflations
    }

    /// Number of times [`save`](WritingSystemRepository::save) was called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Stores a definition read back from disk without touching its dates.
    pub(crate) fn insert_loaded(&mut self, definition: WritingSystemDefinition) -> StoreResult<()> {
        if !self.can_set(&definition) {
            return Err(StoreError::Conflict(definition.language_tag()));
        }
        self.definitions.push(definition);
        Ok(())
    }

    fn position_of_tag(&self, tag: &str) -> Option<usize> {
        self.definitions
            .iter()
            .position(|d| d.language_tag().eq_ignore_ascii_case(tag))
    }
}

impl WritingSystemRepository for MemoryRepository {
    fn all_tags(&self) -> Vec<String> {
        self.definitions.iter().map(WritingSystemDefinition::language_tag).collect()
    }

    fn all_definitions(&self) -> Vec<WritingSystemDefinition> {
        self.definitions.clone()
    }

    fn contains_id(&self, id: DefinitionId) -> bool {
        self.definitions.iter().any(|d| d.id() == id)
    }

    fn can_set(&self, definition: &WritingSystemDefinition) -> bool {
        let tag = definition.language_tag();
        !self
            .definitions
            .iter()
            .any(|d| d.id() != definition.id() && d.language_tag().eq_ignore_ascii_case(&tag))
    }

    fn set(&mut self, definition: &WritingSystemDefinition) -> StoreResult<()> {
        if !self.can_set(definition) {
            return Err(StoreError::Conflict(definition.language_tag()));
        }
        let mut stored = definition.clone();
        stored.date_modified = Some(Utc::now());
        match self.definitions.iter_mut().find(|d| d.id() == definition.id()) {
            Some(existing) => *existing = stored,
            None => self.definitions.push(stored),
        }
        debug!(tag = %definition.language_tag(), id = %definition.id(), "Stored writing system");
        Ok(())
    }

    fn remove(&mut self, id: DefinitionId) -> StoreResult<()> {
        let pos = self
            .definitions
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.definitions.remove(pos);
        info!(tag = %removed.language_tag(), "Removed writing system");
        Ok(())
    }

    fn conflate(&mut self, source_tag: &str, target_tag: &str) -> StoreResult<()> {
        let pos = self
            .position_of_tag(source_tag)
            .ok_or_else(|| StoreError::NotFound(source_tag.to_string()))?;
        self.definitions.remove(pos);
        self.conflations.push(Conflation {
            source_tag: source_tag.to_string(),
            target_tag: target_tag.to_string(),
        });
        info!(source = %source_tag, target = %target_tag, "Conflated writing systems");
        Ok(())
    }

    fn save(&mut self) -> StoreResult<()> {
        self.save_count += 1;
        Ok(())
    }
}
