//! Lookup results.

use serde::{Deserialize, Serialize};

/// One language offered by a search. Produced per search, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCandidate {
    pub language_tag: String,
    /// Known names, primary first.
    pub names: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    /// The language's name for itself.
    #[serde(default)]
    pub local_name: Option<String>,
    /// What the user wants to call the language.
    #[serde(default)]
    pub desired_name: Option<String>,
}

impl LanguageCandidate {
    #[must_use]
    pub fn new(language_tag: &str, names: &[&str]) -> Self {
        Self {
            language_tag: language_tag.to_string(),
            names: names.iter().map(|n| (*n).to_string()).collect(),
            countries: Vec::new(),
            local_name: None,
            desired_name: None,
        }
    }

    #[must_use]
    pub fn with_countries(mut self, countries: &[&str]) -> Self {
        self.countries = countries.iter().map(|c| (*c).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_local_name(mut self, local_name: &str) -> Self {
        self.local_name = Some(local_name.to_string());
        self
    }

    /// The first name, or an empty string.
    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// The first country, or an empty string.
    #[must_use]
    pub fn primary_country(&self) -> &str {
        self.countries.first().map_or("", String::as_str)
    }
}
