//! The setup model: an ordered collection of definitions being edited.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};
use wsetup_model::{
    CollationKind, DefinitionId, IcuImport, IpaStatus, Lifecycle, SpecialSelection,
    WritingSystemDefinition,
};
use wsetup_store::{DefinitionMapper, JsonDefinitionMapper, WriteOptions, WritingSystemRepository};
use wsetup_tag::registry::is_well_known_private_use;
use wsetup_tag::{
    PRIVATE_USE_REGION, PRIVATE_USE_SCRIPT, UNLISTED_LANGUAGE, insert_or_replace_private_use_token,
    to_unique_tag, to_valid_variant_string,
};

use crate::collation::{
    self, CollationConfig, CollatorProvider, DefaultCollatorProvider, SortLanguage,
    prohibited_sort_tags,
};
use crate::config::SetupSection;
use crate::error::{SetupError, SetupResult};
use crate::events::{Listeners, SetupEvent, SubscriptionId};
use crate::host::{Approval, DataDecision, DefaultHost, DeleteOutcome, SetupHost};

/// Edits a collection of writing system definitions.
///
/// A repository-backed model (see [`new`](Self::new)) supports adding,
/// duplicating, deleting, importing and saving. A single-definition model
/// (see [`single`](Self::single)) only edits the one definition; collection
/// operations fail with [`SetupError::InvalidOperation`].
///
/// Every change is announced synchronously to subscribed listeners.
pub struct WritingSystemSetupModel {
    repository: Option<Box<dyn WritingSystemRepository>>,
    definitions: Vec<WritingSystemDefinition>,
    deleted: Vec<WritingSystemDefinition>,
    current: Option<usize>,
    collation: CollationConfig,
    listeners: Listeners,
    host: Box<dyn SetupHost>,
    mapper: Box<dyn DefinitionMapper>,
    collators: Box<dyn CollatorProvider>,
    config: SetupSection,
    locked_selection: Option<SpecialSelection>,
}

impl WritingSystemSetupModel {
    /// Loads every definition from `repository`. Nothing is selected.
    pub fn new<R: WritingSystemRepository + 'static>(repository: R) -> Self {
        let definitions = repository.all_definitions();
        info!(count = definitions.len(), "Opened writing system setup");
        Self::build(Some(Box::new(repository)), definitions, None)
    }

    /// Edits `definition` alone. It starts selected.
    #[must_use]
    pub fn single(definition: WritingSystemDefinition) -> Self {
        let collation = CollationConfig::from_definition(&definition.collation);
        let mut model = Self::build(None, vec![definition], Some(0));
        model.collation = collation;
        model
    }

    fn build(
        repository: Option<Box<dyn WritingSystemRepository>>,
        definitions: Vec<WritingSystemDefinition>,
        current: Option<usize>,
    ) -> Self {
        Self {
            repository,
            definitions,
            deleted: Vec::new(),
            current,
            collation: CollationConfig::default(),
            listeners: Listeners::default(),
            host: Box::new(DefaultHost),
            mapper: Box::new(JsonDefinitionMapper),
            collators: Box::new(DefaultCollatorProvider),
            config: SetupSection::default(),
            locked_selection: None,
        }
    }

    #[must_use]
    pub fn with_host<H: SetupHost + 'static>(mut self, host: H) -> Self {
        self.host = Box::new(host);
        self
    }

    #[must_use]
    pub fn with_mapper<M: DefinitionMapper + 'static>(mut self, mapper: M) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    #[must_use]
    pub fn with_collator_provider<P: CollatorProvider + 'static>(mut self, provider: P) -> Self {
        self.collators = Box::new(provider);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SetupSection) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SetupSection {
        &self.config
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Live definitions in display order.
    #[must_use]
    pub fn definitions(&self) -> &[WritingSystemDefinition] {
        &self.definitions
    }

    /// Definitions deleted during this session, oldest first.
    #[must_use]
    pub fn deleted_definitions(&self) -> &[WritingSystemDefinition] {
        &self.deleted
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current_definition(&self) -> Option<&WritingSystemDefinition> {
        self.current.and_then(|i| self.definitions.get(i))
    }

    #[must_use]
    pub fn uses_repository(&self) -> bool {
        self.repository.is_some()
    }

    #[must_use]
    pub fn repository(&self) -> Option<&dyn WritingSystemRepository> {
        self.repository.as_deref()
    }

    /// Registers a listener. Listeners run in registration order and receive
    /// the live definitions.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(SetupEvent, &[WritingSystemDefinition]) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: SetupEvent) {
        self.listeners.emit(event, &self.definitions);
    }

    fn require_repository(&self) -> SetupResult<()> {
        if self.repository.is_none() {
            return Err(no_repository());
        }
        Ok(())
    }

    fn require_current(&self) -> SetupResult<usize> {
        self.current
            .filter(|i| *i < self.definitions.len())
            .ok_or_else(|| SetupError::InvalidOperation("no writing system is selected".into()))
    }

    // ── Selection ─────────────────────────────────────────────────

    /// Selects the definition at `index`, or clears the selection.
    pub fn set_current_index(&mut self, index: Option<usize>) -> SetupResult<()> {
        if let Some(i) = index {
            if i >= self.definitions.len() {
                return Err(SetupError::ArgumentOutOfRange {
                    index: i,
                    len: self.definitions.len(),
                });
            }
        }
        if index != self.current {
            self.move_cursor(index);
        }
        Ok(())
    }

    /// Selects the first definition with this tag (case-insensitive).
    pub fn set_current_from_language_tag(&mut self, tag: &str) -> bool {
        let found = self
            .definitions
            .iter()
            .position(|d| d.language_tag().eq_ignore_ascii_case(tag));
        self.select_found(found)
    }

    /// Selects the definition with this identity.
    pub fn set_current_definition(&mut self, id: DefinitionId) -> bool {
        let found = self.definitions.iter().position(|d| d.id() == id);
        self.select_found(found)
    }

    pub fn clear_selection(&mut self) {
        if self.current.is_some() {
            self.move_cursor(None);
        }
    }

    fn select_found(&mut self, found: Option<usize>) -> bool {
        match found {
            Some(i) => {
                if self.current != Some(i) {
                    self.move_cursor(Some(i));
                }
                true
            }
            None => false,
        }
    }

    fn move_cursor(&mut self, index: Option<usize>) {
        self.current = index;
        self.collation = self
            .current_definition()
            .map(|d| CollationConfig::from_definition(&d.collation))
            .unwrap_or_default();
        self.emit(SetupEvent::SelectionChanged);
    }

    // ── Collection ────────────────────────────────────────────────

    /// Adds a fresh unlisted-language definition and selects it.
    pub fn add_new(&mut self) -> SetupResult<DefinitionId> {
        let repository = self.repository.as_deref().ok_or_else(no_repository)?;
        let mut definition = repository.create();
        definition.abbreviation = self.config.new_definition_abbreviation.clone();
        self.add_definition(definition)
    }

    /// Adds the definition `bootstrap` produces and selects it. When the
    /// bootstrap is cancelled (returns `None`) listeners are still told and
    /// `Ok(None)` is returned.
    pub fn add_new_with<F>(&mut self, bootstrap: F) -> SetupResult<Option<DefinitionId>>
    where
        F: FnOnce() -> Option<WritingSystemDefinition>,
    {
        self.require_repository()?;
        match bootstrap() {
            Some(definition) => self.add_definition(definition).map(Some),
            None => {
                debug!("New writing system cancelled");
                self.emit(SetupEvent::ItemAddedOrDeleted);
                Ok(None)
            }
        }
    }

    /// Adds an already-built definition and selects it.
    pub fn add_predefined(&mut self, definition: WritingSystemDefinition) -> SetupResult<DefinitionId> {
        self.require_repository()?;
        self.add_definition(definition)
    }

    /// Reads a definition file and adds it.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> SetupResult<DefinitionId> {
        let path = path.as_ref();
        let repository = self.repository.as_deref().ok_or_else(no_repository)?;
        if !path.exists() {
            return Err(SetupError::InvalidArgument(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        let mut definition = repository.create();
        self.mapper.read(path, &mut definition)?;
        info!(path = %path.display(), tag = %definition.language_tag(), "Imported writing system");
        self.add_definition(definition)
    }

    /// Writes the selected definition to `path`.
    pub fn export_current_as_file(&self, path: impl AsRef<Path>) -> SetupResult<()> {
        let path = path.as_ref();
        let index = self.require_current()?;
        let definition = &self.definitions[index];
        self.mapper.write(path, definition, &WriteOptions::default())?;
        info!(path = %path.display(), tag = %definition.language_tag(), "Exported writing system");
        Ok(())
    }

    fn add_definition(&mut self, mut definition: WritingSystemDefinition) -> SetupResult<DefinitionId> {
        if definition.abbreviation.eq_ignore_ascii_case(UNLISTED_LANGUAGE) {
            definition.abbreviation = self.config.unlisted_language_abbreviation.clone();
        }
        let unique = to_unique_tag(&definition.language_tag(), &self.known_tags())?;
        definition.set_language_tag(&unique)?;
        definition.lifecycle = Lifecycle::Active;

        let id = definition.id();
        info!(tag = %unique, id = %id, "Added writing system");
        self.definitions.push(definition);
        self.emit(SetupEvent::ItemAddedOrDeleted);
        self.move_cursor(Some(self.definitions.len() - 1));
        Ok(id)
    }

    /// Tags in the repository and in the live collection.
    fn known_tags(&self) -> Vec<String> {
        let mut tags = self
            .repository
            .as_deref()
            .map(|r| r.all_tags())
            .unwrap_or_default();
        tags.extend(self.definitions.iter().map(WritingSystemDefinition::language_tag));
        tags
    }

    /// Copies the selected definition under a unique tag, inserts the copy
    /// right after it and selects the copy.
    pub fn duplicate_current(&mut self) -> SetupResult<DefinitionId> {
        self.require_repository()?;
        let index = self.require_current()?;
        let mut copy = self.definitions[index].duplicate();
        let unique = to_unique_tag(&copy.language_tag(), &self.known_tags())?;
        copy.set_language_tag(&unique)?;

        let id = copy.id();
        info!(source = %self.definitions[index].language_tag(), tag = %unique, "Duplicated writing system");
        self.definitions.insert(index + 1, copy);
        self.emit(SetupEvent::ItemAddedOrDeleted);
        self.move_cursor(Some(index + 1));
        Ok(id)
    }

    /// Deletes or conflates the selected definition, as the host decides.
    ///
    /// On success the definition moves to
    /// [`deleted_definitions`](Self::deleted_definitions), the selection moves
    /// to the next item (or the previous one if it was last), then
    /// `SelectionChanged` and `ItemAddedOrDeleted` fire.
    pub fn delete_current(&mut self) -> SetupResult<DeleteOutcome> {
        self.require_repository()?;
        let index = self.require_current()?;
        let decision = self.host.what_to_do_with_data(&self.definitions[index]);
        if decision == DataDecision::Nothing {
            debug!("Deletion cancelled by host");
            return Ok(DeleteOutcome::Cancelled);
        }

        let tag = self.definitions[index].language_tag();
        let id = self.definitions[index].id();
        self.definitions[index].lifecycle = Lifecycle::PendingDeletion;

        let approved = match decision {
            DataDecision::Conflate { with } => match self.host.ok_to_conflate(&tag, &with) {
                Approval::Approved => Ok(DeleteOutcome::Conflated {
                    source: tag.clone(),
                    target: with,
                }),
                Approval::Denied { reason } => Err(format!(
                    "Can not conflate the input system {tag} to {with}. {reason}"
                )),
            },
            DataDecision::Delete | DataDecision::Nothing => match self.host.ok_to_delete(&tag) {
                Approval::Approved => Ok(DeleteOutcome::Deleted { tag: tag.clone() }),
                Approval::Denied { reason } => {
                    Err(format!("Can not delete the input system {tag}. {reason}"))
                }
            },
        };

        let outcome = match approved {
            Ok(outcome) => outcome,
            Err(message) => {
                self.definitions[index].lifecycle = Lifecycle::Active;
                info!(tag = %tag, "Deletion declined");
                self.host.report_problem(&message);
                return Ok(DeleteOutcome::Declined { message });
            }
        };

        if let Err(e) = self.remove_from_repository(id, &outcome) {
            self.definitions[index].lifecycle = Lifecycle::Active;
            return Err(e);
        }

        let mut removed = self.definitions.remove(index);
        removed.lifecycle = Lifecycle::Deleted;
        self.deleted.push(removed);
        info!(outcome = ?outcome, "Removed writing system");

        let len = self.definitions.len();
        let next = if index < len {
            Some(index)
        } else {
            len.checked_sub(1)
        };
        self.move_cursor(next);
        self.emit(SetupEvent::ItemAddedOrDeleted);
        Ok(outcome)
    }

    fn remove_from_repository(&mut self, id: DefinitionId, outcome: &DeleteOutcome) -> SetupResult<()> {
        let repository = self.repository.as_deref_mut().ok_or_else(no_repository)?;
        match outcome {
            DeleteOutcome::Conflated { target, .. } => {
                let stored = repository
                    .all_definitions()
                    .into_iter()
                    .find(|d| d.id() == id)
                    .map(|d| d.language_tag());
                if let Some(source) = stored {
                    repository.conflate(&source, target)?;
                }
            }
            DeleteOutcome::Deleted { .. } => {
                if repository.contains_id(id) {
                    repository.remove(id)?;
                }
            }
            DeleteOutcome::Cancelled | DeleteOutcome::Declined { .. } => {}
        }
        Ok(())
    }

    /// Stores every live definition, then saves the repository.
    pub fn save(&mut self) -> SetupResult<()> {
        self.set_all_possible_and_remove_others()?;
        let repository = self.repository.as_deref_mut().ok_or_else(no_repository)?;
        repository.save()?;
        info!(count = self.definitions.len(), "Saved writing systems");
        Ok(())
    }

    /// Stores every live definition the repository accepts.
    ///
    /// Definitions refused on the first pass (their tag is held by another
    /// stored definition, e.g. while two tags are being swapped) get a second
    /// chance with a tag made unique against the store. A definition refused
    /// twice is removed from the store and reported.
    pub fn set_all_possible_and_remove_others(&mut self) -> SetupResult<()> {
        let mut deferred = Vec::new();
        {
            let repository = self.repository.as_deref_mut().ok_or_else(no_repository)?;
            for (i, definition) in self.definitions.iter().enumerate() {
                if repository.can_set(definition) {
                    repository.set(definition)?;
                } else {
                    deferred.push(i);
                }
            }
        }

        for i in deferred {
            let id = self.definitions[i].id();
            let tag = self.definitions[i].language_tag();
            let stored_tags: Vec<String> = self
                .repository
                .as_deref()
                .ok_or_else(no_repository)?
                .all_definitions()
                .iter()
                .filter(|d| d.id() != id)
                .map(WritingSystemDefinition::language_tag)
                .collect();
            let unique = to_unique_tag(&tag, &stored_tags)?;
            if unique != tag {
                self.definitions[i].set_language_tag(&unique)?;
                info!(from = %tag, to = %unique, "Renamed writing system to avoid a tag clash");
                self.emit(SetupEvent::ItemAddedOrDeleted);
            }

            let repository = self.repository.as_deref_mut().ok_or_else(no_repository)?;
            let definition = &self.definitions[i];
            if repository.can_set(definition) {
                repository.set(definition)?;
                continue;
            }
            if repository.contains_id(id) {
                repository.remove(id)?;
            }
            let message = format!(
                "The writing system {unique} could not be stored and was removed from the store."
            );
            warn!(tag = %unique, "Writing system refused by store");
            self.host.report_problem(&message);
        }
        Ok(())
    }

    // ── Current definition ────────────────────────────────────────

    /// Applies `edit` to a copy of the selected definition and commits it
    /// if it changed. Returns whether anything changed.
    fn update_current<F>(&mut self, edit: F) -> SetupResult<bool>
    where
        F: FnOnce(&mut WritingSystemDefinition) -> SetupResult<()>,
    {
        let index = self.require_current()?;
        let mut edited = self.definitions[index].clone();
        edit(&mut edited)?;
        if edited == self.definitions[index] {
            return Ok(false);
        }
        self.definitions[index] = edited;
        self.emit(SetupEvent::CurrentItemUpdated);
        Ok(true)
    }

    pub fn set_current_abbreviation(&mut self, abbreviation: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.abbreviation = abbreviation.to_string();
            Ok(())
        })
    }

    pub fn set_current_language_name(&mut self, name: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.language_name = name.to_string();
            Ok(())
        })
    }

    pub fn set_current_language_code(&mut self, code: &str) -> SetupResult<bool> {
        self.update_current(|d| Ok(d.set_language(code)?))
    }

    /// An empty script clears it.
    pub fn set_current_script(&mut self, script: &str) -> SetupResult<bool> {
        self.update_current(|d| Ok(d.set_script(script)?))
    }

    /// An empty region clears it.
    pub fn set_current_region(&mut self, region: &str) -> SetupResult<bool> {
        self.update_current(|d| Ok(d.set_region(region)?))
    }

    /// Sets variants and private use from a combined field. Unregistered
    /// variants move to private use. Input that cannot be made valid is
    /// reported to the host and leaves the definition unchanged.
    pub fn set_current_variant(&mut self, field: &str) -> SetupResult<bool> {
        let valid = match to_valid_variant_string(field) {
            Ok(valid) => valid,
            Err(e) => return Err(self.rejected(e.to_string())),
        };
        match self.update_current(|d| Ok(d.set_variant_field(&valid)?)) {
            Err(SetupError::Tag(e)) => Err(self.rejected(e.to_string())),
            other => other,
        }
    }

    fn rejected(&mut self, message: String) -> SetupError {
        self.host.report_problem(&message);
        SetupError::Validation(message)
    }

    pub fn set_current_ipa_status(&mut self, status: IpaStatus) -> SetupResult<bool> {
        self.update_current(|d| {
            d.set_ipa_status(status);
            Ok(())
        })
    }

    pub fn set_current_is_voice(&mut self, voice: bool) -> SetupResult<bool> {
        self.update_current(|d| {
            d.set_is_voice(voice);
            Ok(())
        })
    }

    pub fn set_current_font_name(&mut self, font: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.default_font_name = font.to_string();
            Ok(())
        })
    }

    pub fn set_current_font_size(&mut self, size: f32) -> SetupResult<bool> {
        self.update_current(|d| {
            d.default_font_size = size;
            Ok(())
        })
    }

    pub fn set_current_keyboard(&mut self, keyboard: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.keyboard = keyboard.to_string();
            Ok(())
        })
    }

    pub fn set_current_right_to_left(&mut self, right_to_left: bool) -> SetupResult<bool> {
        self.update_current(|d| {
            d.right_to_left = right_to_left;
            Ok(())
        })
    }

    pub fn set_current_spell_checking_id(&mut self, id: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.spell_checking_id = id.to_string();
            Ok(())
        })
    }

    pub fn set_current_version_number(&mut self, version: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.version_number = version.to_string();
            Ok(())
        })
    }

    pub fn set_current_version_description(&mut self, description: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            d.version_description = description.to_string();
            Ok(())
        })
    }

    // ── Identifier editors ────────────────────────────────────────

    pub fn identifier_voice_selected(&mut self) -> SetupResult<bool> {
        self.set_current_is_voice(true)
    }

    /// Turns voice off, clears the script and makes the definition IPA if
    /// it is not already.
    pub fn identifier_ipa_selected(&mut self) -> SetupResult<bool> {
        self.update_current(|d| {
            d.set_is_voice(false);
            d.set_script("")?;
            if d.ipa_status() == IpaStatus::NotIpa {
                d.set_ipa_status(IpaStatus::Ipa);
            }
            Ok(())
        })
    }

    /// Clears script, region and variants, except the placeholders
    /// (`qaa`, `Qaaa`, `QM`) that mark custom subtags. The variant field of a
    /// definition with any placeholder is kept too, since it holds the
    /// custom names.
    pub fn identifier_nothing_selected(&mut self) -> SetupResult<bool> {
        self.update_current(|d| {
            let custom_region = d.region() == Some(PRIVATE_USE_REGION);
            let custom_script = d.script() == Some(PRIVATE_USE_SCRIPT);
            let custom_language = d.language() == UNLISTED_LANGUAGE;
            if !custom_language && !custom_region && !custom_script {
                d.set_variant_field("")?;
            }
            if !custom_region {
                d.set_region("")?;
            }
            if !custom_script {
                d.set_script("")?;
            }
            Ok(())
        })
    }

    /// Records an unlisted language's name in the private-use section.
    pub fn set_current_variant_from_unlisted_language_name(&mut self, name: &str) -> SetupResult<bool> {
        self.update_current(|d| {
            let field = insert_or_replace_private_use_token(&d.variant_field(), name);
            Ok(d.set_variant_field(&field)?)
        })
    }

    /// Gives the selected definition a new language code and name. The first
    /// private-use token that is not a well-known marker, which held an
    /// unlisted language's name, is dropped.
    pub fn rename_current_language(&mut self, code: &str, name: &str) -> SetupResult<bool> {
        self.require_repository()?;
        let index = self.require_current()?;
        let mut edited = self.definitions[index].clone();
        edited.set_language(code)?;
        edited.language_name = name.to_string();
        let mut parts = edited.parts().clone();
        if let Some(pos) = parts.private_use.iter().position(|t| !is_well_known_private_use(t)) {
            parts.private_use.remove(pos);
        }
        edited.set_parts(parts);

        if edited == self.definitions[index] {
            return Ok(false);
        }
        info!(from = %self.definitions[index].language_tag(), to = %edited.language_tag(), "Renamed language");
        self.definitions[index] = edited;
        self.emit(SetupEvent::SelectionChanged);
        self.emit(SetupEvent::CurrentItemUpdated);
        Ok(true)
    }

    // ── List support ──────────────────────────────────────────────

    #[must_use]
    pub fn list_labels(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(WritingSystemDefinition::display_label)
            .collect()
    }

    /// One flag per definition: false when another live definition has the
    /// same tag (case-insensitive).
    #[must_use]
    pub fn can_save_flags(&self) -> Vec<bool> {
        let tags: Vec<String> = self
            .definitions
            .iter()
            .map(|d| d.language_tag().to_ascii_lowercase())
            .collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tag in &tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
        tags.iter().map(|t| counts.get(t.as_str()) == Some(&1)).collect()
    }

    #[must_use]
    pub fn can_save_current(&self) -> bool {
        self.current
            .and_then(|i| self.can_save_flags().get(i).copied())
            .unwrap_or(false)
    }

    /// E.g. `Chorti in GT written in Latn script. (caa-Latn-GT)`.
    #[must_use]
    pub fn verbose_description(&self, definition: &WritingSystemDefinition) -> String {
        let mut summary = definition.language_name.trim().to_string();
        if let Some(region) = definition.region() {
            summary.push_str(&format!(" in {region}"));
        }
        if let Some(script) = definition.script() {
            summary.push_str(&format!(" written in {script} script"));
        }
        summary.push_str(&format!(". ({})", definition.language_tag()));
        summary.trim().to_string()
    }

    #[must_use]
    pub fn current_verbose_description(&self) -> String {
        self.current_definition()
            .map(|d| self.verbose_description(d))
            .unwrap_or_default()
    }

    /// Pins the special identifier editor, or unpins it with `None`.
    pub fn lock_special_selection(&mut self, selection: Option<SpecialSelection>) {
        self.locked_selection = selection;
    }

    /// The special identifier editor for the selected definition.
    #[must_use]
    pub fn special_selection(&self) -> SpecialSelection {
        if let Some(locked) = self.locked_selection {
            return locked;
        }
        self.current_definition()
            .map_or(SpecialSelection::None, WritingSystemDefinition::special_selection)
    }

    // ── Collation ─────────────────────────────────────────────────

    #[must_use]
    pub fn current_collation_kind(&self) -> CollationKind {
        self.collation.kind()
    }

    /// Switches the selected definition's collation kind. Rules of the
    /// previous kind are discarded.
    pub fn set_current_collation_kind(&mut self, kind: CollationKind) -> SetupResult<bool> {
        let index = self.require_current()?;
        if !self
            .collation
            .transition(&mut self.definitions[index].collation, kind)
        {
            return Ok(false);
        }
        debug!(kind = ?kind, "Collation kind changed");
        self.emit(SetupEvent::CurrentItemUpdated);
        Ok(true)
    }

    #[must_use]
    pub fn current_collation_rules(&self) -> String {
        self.current_definition()
            .map(|d| self.collation.rules(&d.collation))
            .unwrap_or_default()
    }

    /// Sets the rule text for the current kind. Text that does not validate
    /// (including a "sort like" reference that would form a cycle) is
    /// reported to the host and not applied.
    pub fn set_current_collation_rules(&mut self, text: &str) -> SetupResult<bool> {
        let index = self.require_current()?;
        let mut scratch = self.definitions[index].collation.clone();
        if !self.collation.set_rules(&mut scratch, text) {
            return Ok(false);
        }

        let mut check = scratch.validate();
        if check.is_ok() && self.collation.kind() == CollationKind::OtherLanguage {
            let prohibited =
                prohibited_sort_tags(&self.definitions, &self.definitions[index].language_tag());
            if prohibited.contains(&text.trim().to_ascii_lowercase()) {
                check = Err(format!(
                    "Sorting like {} would make the sort order depend on itself",
                    text.trim()
                ));
            }
        }
        if let Err(message) = check {
            return Err(self.rejected(message));
        }

        self.definitions[index].collation = scratch;
        self.emit(SetupEvent::CurrentItemUpdated);
        Ok(true)
    }

    /// Replaces custom ICU rules with an import.
    pub fn import_current_collation(&mut self, import: IcuImport) -> SetupResult<bool> {
        let index = self.require_current()?;
        if !self
            .collation
            .import_rules(&mut self.definitions[index].collation, import)
        {
            return Ok(false);
        }
        self.emit(SetupEvent::CurrentItemUpdated);
        Ok(true)
    }

    pub fn validate_current_sort_rules(&self) -> SetupResult<()> {
        let index = self.require_current()?;
        self.definitions[index]
            .collation
            .validate()
            .map_err(SetupError::Validation)
    }

    /// Languages the selected definition may sort like: the other live
    /// definitions, then `available`, minus anything that would form a cycle.
    #[must_use]
    pub fn sort_language_options(&self, available: &[SortLanguage]) -> Vec<SortLanguage> {
        let Some(current) = self.current_definition() else {
            return Vec::new();
        };
        let prohibited = prohibited_sort_tags(&self.definitions, &current.language_tag());
        let mut options: Vec<SortLanguage> = self
            .definitions
            .iter()
            .filter(|d| d.id() != current.id())
            .map(|d| SortLanguage::new(&d.language_tag(), &d.display_label()))
            .collect();
        options.extend_from_slice(available);
        collation::sort_language_options(&options, &prohibited)
    }

    /// The collation kinds offered to the user, with their labels.
    #[must_use]
    pub fn sort_using_options(&self) -> &'static [(CollationKind, &'static str)] {
        &CollationKind::ALL
    }

    /// Sorts the lines of `text` with the selected definition's collation.
    #[must_use]
    pub fn test_sort(&self, text: &str) -> String {
        let collator = self
            .current_definition()
            .and_then(|d| self.collators.collator_for(&d.collation));
        collation::test_sort(text, collator.as_deref())
    }
}

fn no_repository() -> SetupError {
    SetupError::InvalidOperation(
        "unable to change the collection of writing systems without a repository".into(),
    )
}
