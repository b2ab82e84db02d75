//! Definitions grouped by base language for the tree view.

use std::cell::RefCell;
use std::rc::Rc;

use wsetup_model::{DefinitionId, WritingSystemDefinition};

use crate::config::SetupSection;
use crate::events::{SetupEvent, SubscriptionId};
use crate::model::WritingSystemSetupModel;

/// Label of the trailing group of suggested languages.
pub const OTHER_LANGUAGES_LABEL: &str = "Other Languages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// `None` for suggestions that are not in the collection.
    pub id: Option<DefinitionId>,
    pub language_tag: String,
    pub label: String,
}

impl TreeItem {
    fn from_definition(definition: &WritingSystemDefinition) -> Self {
        Self {
            id: Some(definition.id()),
            language_tag: definition.language_tag(),
            label: definition.display_label(),
        }
    }

    fn suggestion(tag: &str) -> Self {
        Self {
            id: None,
            language_tag: tag.to_string(),
            label: tag.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeGroup {
    /// Definitions sharing a base language. The main item is the least
    /// specific one.
    Language {
        main: TreeItem,
        children: Vec<TreeItem>,
    },
    /// Known languages not yet in the collection.
    OtherLanguages { children: Vec<TreeItem> },
}

/// Groups `definitions` by base language, in order of first appearance.
///
/// Within a group the main item has the fewest script/region/variant fields;
/// ties go to the earlier definition. Known tags that match no definition
/// (case-insensitive) are listed in a trailing "Other Languages" group,
/// omitted when empty.
#[must_use]
pub fn build_groups(
    definitions: &[WritingSystemDefinition],
    other_known_tags: &[String],
) -> Vec<TreeGroup> {
    let mut buckets: Vec<(String, Vec<&WritingSystemDefinition>)> = Vec::new();
    for definition in definitions {
        let base = definition.language().to_ascii_lowercase();
        match buckets.iter_mut().find(|(b, _)| *b == base) {
            Some((_, members)) => members.push(definition),
            None => buckets.push((base, vec![definition])),
        }
    }

    let mut groups: Vec<TreeGroup> = buckets
        .into_iter()
        .filter_map(|(_, members)| {
            let (main_pos, _) = members
                .iter()
                .enumerate()
                .min_by_key(|(_, d)| d.parts().specificity())?;
            let main = TreeItem::from_definition(members[main_pos]);
            let children = members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != main_pos)
                .map(|(_, d)| TreeItem::from_definition(d))
                .collect();
            Some(TreeGroup::Language { main, children })
        })
        .collect();

    let others: Vec<TreeItem> = other_known_tags
        .iter()
        .filter(|tag| {
            !definitions
                .iter()
                .any(|d| d.language_tag().eq_ignore_ascii_case(tag))
        })
        .map(|tag| TreeItem::suggestion(tag))
        .collect();
    if !others.is_empty() {
        groups.push(TreeGroup::OtherLanguages { children: others });
    }
    groups
}

/// Tree kept in step with a [`WritingSystemSetupModel`]: rebuilt in full
/// whenever an item is added or deleted.
#[derive(Debug, Default)]
pub struct WritingSystemTree {
    other_known_tags: Vec<String>,
    groups: Vec<TreeGroup>,
    rebuilds: usize,
}

impl WritingSystemTree {
    #[must_use]
    pub fn new(other_known_tags: Vec<String>) -> Self {
        Self {
            other_known_tags,
            groups: Vec::new(),
            rebuilds: 0,
        }
    }

    /// A tree offering the configured `other_known_languages`.
    #[must_use]
    pub fn from_config(config: &SetupSection) -> Self {
        Self::new(config.other_known_languages.clone())
    }

    /// Builds the tree from `model` and subscribes it to the model's
    /// add/delete events.
    pub fn attach(tree: &Rc<RefCell<Self>>, model: &mut WritingSystemSetupModel) -> SubscriptionId {
        tree.borrow_mut().rebuild(model.definitions());
        let weak = Rc::downgrade(tree);
        model.subscribe(move |event, definitions| {
            if event != SetupEvent::ItemAddedOrDeleted {
                return;
            }
            if let Some(tree) = weak.upgrade() {
                tree.borrow_mut().rebuild(definitions);
            }
        })
    }

    pub fn rebuild(&mut self, definitions: &[WritingSystemDefinition]) {
        self.groups = build_groups(definitions, &self.other_known_tags);
        self.rebuilds += 1;
    }

    #[must_use]
    pub fn groups(&self) -> &[TreeGroup] {
        &self.groups
    }

    /// Number of rebuilds so far.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }
}
