//! Shared test helpers for setup model tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use wsetup_model::{DefinitionId, WritingSystemDefinition};
use wsetup_setup::{
    Approval, DataDecision, SetupEvent, SetupHost, WritingSystemSetupModel,
};
use wsetup_store::{MemoryRepository, StoreResult, WritingSystemRepository};

/// Installs a test subscriber once so `RUST_LOG` shows model logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A definition for `tag` with an abbreviation derived from it.
pub fn make_definition(tag: &str) -> WritingSystemDefinition {
    let mut definition = WritingSystemDefinition::new(tag).unwrap();
    definition.abbreviation = tag.to_uppercase();
    definition
}

/// A model over a shared repository holding `tags`, plus the repository.
pub fn make_model(tags: &[&str]) -> (WritingSystemSetupModel, SharedRepository) {
    let definitions = tags.iter().map(|t| make_definition(t)).collect();
    let repo = SharedRepository::new(MemoryRepository::with_definitions(definitions).unwrap());
    (WritingSystemSetupModel::new(repo.clone()), repo)
}

/// Tags of the live definitions, in order.
pub fn tags(model: &WritingSystemSetupModel) -> Vec<String> {
    model
        .definitions()
        .iter()
        .map(WritingSystemDefinition::language_tag)
        .collect()
}

/// Records every event a model emits.
pub fn record_events(model: &mut WritingSystemSetupModel) -> Rc<RefCell<Vec<SetupEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    model.subscribe(move |event, _| sink.borrow_mut().push(event));
    events
}

// ── Repositories ─────────────────────────────────────────────────

/// A [`MemoryRepository`] the test can still inspect after handing it to a model.
#[derive(Debug, Clone, Default)]
pub struct SharedRepository(pub Rc<RefCell<MemoryRepository>>);

impl SharedRepository {
    pub fn new(inner: MemoryRepository) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }

    pub fn sorted_tags(&self) -> Vec<String> {
        let mut tags = self.0.borrow().all_tags();
        tags.sort();
        tags
    }
}

impl WritingSystemRepository for SharedRepository {
    fn all_tags(&self) -> Vec<String> {
        self.0.borrow().all_tags()
    }

    fn all_definitions(&self) -> Vec<WritingSystemDefinition> {
        self.0.borrow().all_definitions()
    }

    fn contains_id(&self, id: DefinitionId) -> bool {
        self.0.borrow().contains_id(id)
    }

    fn can_set(&self, definition: &WritingSystemDefinition) -> bool {
        self.0.borrow().can_set(definition)
    }

    fn set(&mut self, definition: &WritingSystemDefinition) -> StoreResult<()> {
        self.0.borrow_mut().set(definition)
    }

    fn remove(&mut self, id: DefinitionId) -> StoreResult<()> {
        self.0.borrow_mut().remove(id)
    }

    fn conflate(&mut self, source_tag: &str, target_tag: &str) -> StoreResult<()> {
        self.0.borrow_mut().conflate(source_tag, target_tag)
    }

    fn save(&mut self) -> StoreResult<()> {
        self.0.borrow_mut().save()
    }
}

/// Accepts definitions like a [`MemoryRepository`] except for one tag,
/// which it always refuses.
#[derive(Debug, Default)]
pub struct RefusingRepository {
    pub inner: MemoryRepository,
    pub refused_prefix: String,
}

impl RefusingRepository {
    pub fn refusing(prefix: &str) -> Self {
        Self {
            inner: MemoryRepository::open_in_memory(),
            refused_prefix: prefix.to_string(),
        }
    }
}

impl WritingSystemRepository for RefusingRepository {
    fn all_tags(&self) -> Vec<String> {
        self.inner.all_tags()
    }

    fn all_definitions(&self) -> Vec<WritingSystemDefinition> {
        self.inner.all_definitions()
    }

    fn contains_id(&self, id: DefinitionId) -> bool {
        self.inner.contains_id(id)
    }

    fn can_set(&self, definition: &WritingSystemDefinition) -> bool {
        !definition.language_tag().starts_with(&self.refused_prefix) && self.inner.can_set(definition)
    }

    fn set(&mut self, definition: &WritingSystemDefinition) -> StoreResult<()> {
        self.inner.set(definition)
    }

    fn remove(&mut self, id: DefinitionId) -> StoreResult<()> {
        self.inner.remove(id)
    }

    fn conflate(&mut self, source_tag: &str, target_tag: &str) -> StoreResult<()> {
        self.inner.conflate(source_tag, target_tag)
    }

    fn save(&mut self) -> StoreResult<()> {
        self.inner.save()
    }
}

// ── Host ─────────────────────────────────────────────────────────

/// What a [`RecordingHost`] answers, and what it was told.
#[derive(Debug, Clone)]
pub struct HostScript {
    pub decision: DataDecision,
    pub conflate: Approval,
    pub delete: Approval,
    pub problems: Vec<String>,
}

impl Default for HostScript {
    fn default() -> Self {
        Self {
            decision: DataDecision::Delete,
            conflate: Approval::Approved,
            delete: Approval::Approved,
            problems: Vec::new(),
        }
    }
}

/// Host whose answers the test scripts and whose reports it can read.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost(pub Rc<RefCell<HostScript>>);

impl RecordingHost {
    pub fn answering(decision: DataDecision) -> Self {
        let host = Self::default();
        host.0.borrow_mut().decision = decision;
        host
    }

    pub fn problems(&self) -> Vec<String> {
        self.0.borrow().problems.clone()
    }
}

impl SetupHost for RecordingHost {
    fn what_to_do_with_data(&mut self, _doomed: &WritingSystemDefinition) -> DataDecision {
        self.0.borrow().decision.clone()
    }

    fn ok_to_conflate(&mut self, _source_tag: &str, _target_tag: &str) -> Approval {
        self.0.borrow().conflate.clone()
    }

    fn ok_to_delete(&mut self, _tag: &str) -> Approval {
        self.0.borrow().delete.clone()
    }

    fn report_problem(&mut self, message: &str) {
        self.0.borrow_mut().problems.push(message.to_string());
    }
}
