//! Collation kind state machine and sort-related helpers.

use std::collections::HashSet;

use wsetup_model::{
    CollationDefinition, CollationKind, Collator, IcuImport, SimpleRulesCollator,
    WritingSystemDefinition, default_custom_simple_rules,
};

/// The collation kind shown for the selected definition.
///
/// The kind is tracked separately from the stored definition because
/// "Custom ICU rules" with no rules yet looks exactly like the default
/// ordering once stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollationConfig {
    kind: CollationKind,
}

impl Default for CollationConfig {
    fn default() -> Self {
        Self {
            kind: CollationKind::DefaultOrdering,
        }
    }
}

impl CollationConfig {
    /// Derives the state from a stored collation.
    #[must_use]
    pub fn from_definition(collation: &CollationDefinition) -> Self {
        Self {
            kind: CollationKind::of(collation),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CollationKind {
        self.kind
    }

    /// Switches to `to`, installing a fresh empty collation of that kind.
    /// The previous rules are discarded. Returns whether the kind changed.
    pub fn transition(&mut self, collation: &mut CollationDefinition, to: CollationKind) -> bool {
        if self.kind == to {
            return false;
        }
        *collation = to.empty_definition();
        self.kind = to;
        true
    }

    /// The rule text to show for the current kind.
    #[must_use]
    pub fn rules(&self, collation: &CollationDefinition) -> String {
        match (self.kind, collation) {
            (CollationKind::CustomIcu, CollationDefinition::Icu { rules, .. }) => rules.clone(),
            (CollationKind::CustomSimple, CollationDefinition::Simple { rules }) => {
                if rules.is_empty() {
                    default_custom_simple_rules()
                } else {
                    rules.clone()
                }
            }
            (CollationKind::OtherLanguage, CollationDefinition::System { language_tag }) => {
                language_tag.clone()
            }
            _ => String::new(),
        }
    }

    /// Stores `text` as the rules for the current kind. Has no effect for the
    /// default ordering. Setting ICU rules clears imports. Returns whether
    /// the collation changed.
    pub fn set_rules(&self, collation: &mut CollationDefinition, text: &str) -> bool {
        match (self.kind, collation) {
            (CollationKind::CustomIcu, CollationDefinition::Icu { rules, imports }) => {
                if rules == text && imports.is_empty() {
                    return false;
                }
                *rules = text.to_string();
                imports.clear();
                true
            }
            (CollationKind::CustomSimple, CollationDefinition::Simple { rules }) => {
                replace_if_different(rules, text)
            }
            (CollationKind::OtherLanguage, CollationDefinition::System { language_tag }) => {
                replace_if_different(language_tag, text)
            }
            _ => false,
        }
    }

    /// Replaces locally authored ICU rules with an import. Only applies to
    /// custom ICU collation.
    pub fn import_rules(&self, collation: &mut CollationDefinition, import: IcuImport) -> bool {
        if self.kind != CollationKind::CustomIcu {
            return false;
        }
        let imported = CollationDefinition::Icu {
            rules: String::new(),
            imports: vec![import],
        };
        if *collation == imported {
            return false;
        }
        *collation = imported;
        true
    }
}

fn replace_if_different(target: &mut String, text: &str) -> bool {
    if target == text {
        return false;
    }
    *target = text.to_string();
    true
}

/// Tags (lowercased) that `current_tag` must not sort like: itself and,
/// transitively, every definition that already sorts like a prohibited tag.
#[must_use]
pub fn prohibited_sort_tags(
    definitions: &[WritingSystemDefinition],
    current_tag: &str,
) -> HashSet<String> {
    let mut prohibited = HashSet::from([current_tag.to_ascii_lowercase()]);
    loop {
        let mut added = false;
        for definition in definitions {
            if let CollationDefinition::System { language_tag } = &definition.collation {
                if prohibited.contains(&language_tag.to_ascii_lowercase())
                    && prohibited.insert(definition.language_tag().to_ascii_lowercase())
                {
                    added = true;
                }
            }
        }
        if !added {
            return prohibited;
        }
    }
}

/// A language offered in the "sort like" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortLanguage {
    pub tag: String,
    pub name: String,
}

impl SortLanguage {
    #[must_use]
    pub fn new(tag: &str, name: &str) -> Self {
        Self {
            tag: tag.to_string(),
            name: name.to_string(),
        }
    }
}

/// `available` without the prohibited tags or repeated tags.
#[must_use]
pub fn sort_language_options(
    available: &[SortLanguage],
    prohibited: &HashSet<String>,
) -> Vec<SortLanguage> {
    let mut seen: HashSet<String> = HashSet::new();
    available
        .iter()
        .filter(|option| {
            let key = option.tag.to_ascii_lowercase();
            !prohibited.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}

/// Builds collators for collation definitions.
pub trait CollatorProvider {
    /// A collator for `collation`, or `None` when nothing can be sorted with it.
    fn collator_for(&self, collation: &CollationDefinition) -> Option<Box<dyn Collator>>;
}

/// Provides [`SimpleRulesCollator`]s for valid simple rules and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollatorProvider;

impl CollatorProvider for DefaultCollatorProvider {
    fn collator_for(&self, collation: &CollationDefinition) -> Option<Box<dyn Collator>> {
        match collation {
            CollationDefinition::Simple { rules } => SimpleRulesCollator::new(rules)
                .ok()
                .map(|c| Box::new(c) as Box<dyn Collator>),
            _ => None,
        }
    }
}

/// Sorts the lines of `text` with `collator` and joins them with CRLF.
/// Empty lines are dropped. Without a collator the text is returned as is.
#[must_use]
pub fn test_sort(text: &str, collator: Option<&dyn Collator>) -> String {
    let Some(collator) = collator else {
        return text.to_string();
    };
    let mut lines: Vec<&str> = text.split(['\r', '\n']).filter(|l| !l.is_empty()).collect();
    lines.sort_by_cached_key(|line| collator.sort_key(line));
    lines.join("\r\n")
}
