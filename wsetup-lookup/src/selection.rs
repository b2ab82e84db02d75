//! The chosen candidate and the name the user wants for it.

use std::collections::HashMap;

use wsetup_tag::UNLISTED_LANGUAGE;

use crate::candidate::LanguageCandidate;

/// Tracks the selected [`LanguageCandidate`] and its desired name.
#[derive(Debug, Clone)]
pub struct LanguageSelection {
    unlisted_label: String,
    aliases: HashMap<String, String>,
    selected: Option<LanguageCandidate>,
    desired_name: String,
    /// Tag and name of an existing definition, consulted by the first selection only.
    initial: Option<(String, String)>,
}

impl LanguageSelection {
    #[must_use]
    pub fn new(unlisted_label: &str) -> Self {
        Self {
            unlisted_label: unlisted_label.to_string(),
            aliases: HashMap::new(),
            selected: None,
            desired_name: String::new(),
            initial: None,
        }
    }

    /// Starts from an existing definition's tag and name, so selecting that
    /// tag first restores the name.
    #[must_use]
    pub fn with_initial(mut self, tag: &str, desired_name: &str) -> Self {
        self.initial = Some((tag.to_string(), desired_name.to_string()));
        self
    }

    pub fn register_alias(&mut self, tag: &str, name: &str) {
        self.aliases.insert(tag.to_ascii_lowercase(), name.to_string());
    }

    /// Selects `candidate` (or clears the selection) and picks its desired
    /// name. `search_text` is what the user typed to find it.
    ///
    /// The desired name is, in order: the name entered for the previous
    /// selection when it had the same tag; a registered alias; the local
    /// name; for the unlisted language, the search text with its first letter
    /// capitalised; the first name starting with the search text; the
    /// primary name.
    pub fn select(&mut self, candidate: Option<LanguageCandidate>, search_text: &str) {
        let initial = self.initial.take();
        let previous = match self.selected.take() {
            Some(current) => Some((current.language_tag, std::mem::take(&mut self.desired_name))),
            None => initial,
        };

        let Some(mut candidate) = candidate else {
            self.desired_name.clear();
            return;
        };

        let name = self.desired_name_for(&candidate, previous.as_ref(), search_text.trim());
        candidate.desired_name = Some(name.clone());
        self.desired_name = name;
        self.selected = Some(candidate);
    }

    fn desired_name_for(
        &self,
        candidate: &LanguageCandidate,
        previous: Option<&(String, String)>,
        search_text: &str,
    ) -> String {
        let tag = &candidate.language_tag;
        if let Some((previous_tag, name)) = previous {
            if previous_tag.eq_ignore_ascii_case(tag)
                && !name.trim().is_empty()
                && name.trim() != self.unlisted_label
            {
                return name.clone();
            }
        }
        if let Some(alias) = self.aliases.get(&tag.to_ascii_lowercase()) {
            return alias.clone();
        }
        if let Some(local) = candidate.local_name.as_ref().filter(|n| !n.trim().is_empty()) {
            return local.clone();
        }
        if tag.eq_ignore_ascii_case(UNLISTED_LANGUAGE) && !search_text.is_empty() && search_text != "?" {
            return capitalize_first(search_text);
        }
        let lowered = search_text.to_lowercase();
        if !lowered.is_empty() {
            if let Some(name) = candidate.names.iter().find(|n| n.to_lowercase().starts_with(&lowered)) {
                return name.clone();
            }
        }
        candidate.primary_name().to_string()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&LanguageCandidate> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn desired_name(&self) -> &str {
        &self.desired_name
    }

    /// Records the name the user typed for the selected language.
    pub fn set_desired_name(&mut self, name: &str) {
        self.desired_name = name.to_string();
        if let Some(candidate) = &mut self.selected {
            candidate.desired_name = Some(name.to_string());
        }
    }

    /// A language is selected and it has a real name.
    #[must_use]
    pub fn has_sufficient_information(&self) -> bool {
        let name = self.desired_name.trim();
        self.selected.is_some() && !name.is_empty() && name != self.unlisted_label
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
