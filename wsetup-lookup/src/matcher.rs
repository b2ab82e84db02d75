//! Filtering of directory results for display.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wsetup_tag::{RegionLookup, TagParts, UNLISTED_LANGUAGE, region_or_empty};

use crate::candidate::LanguageCandidate;
use crate::directory::LanguageDirectory;
use crate::error::LookupResult;
use crate::selection::LanguageSelection;

/// Label of the synthetic candidate offered for the query `?`.
pub const DEFAULT_UNLISTED_LANGUAGE_LABEL: &str = "Unlisted Language";

/// Regional Chinese tags kept even when regional dialects are hidden.
const ALWAYS_SHOWN_REGIONAL_TAGS: &[&str] = &["zh-CN", "zh-TW"];

/// Tags hidden when the simplified Chinese preset is on.
const SIMPLIFIED_CHINESE_HIDDEN: &[&str] = &["zh", "cmn", "zh-Hans", "zh-Hant"];

/// Display names used by the simplified Chinese preset.
const SIMPLIFIED_CHINESE_ALIASES: &[(&str, &str)] = &[
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

fn default_unlisted_label() -> String {
    DEFAULT_UNLISTED_LANGUAGE_LABEL.to_string()
}

/// Display policy for lookup results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherOptions {
    /// Show candidates whose tag carries a region.
    #[serde(default)]
    pub include_regional_dialects: bool,
    /// Show candidates whose tag carries a script.
    #[serde(default)]
    pub include_script_markers: bool,
    #[serde(default = "default_unlisted_label")]
    pub unlisted_language_label: String,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            include_regional_dialects: false,
            include_script_markers: false,
            unlisted_language_label: default_unlisted_label(),
        }
    }
}

type CandidateFilter = Box<dyn Fn(&LanguageCandidate) -> bool>;

/// Runs queries against a [`LanguageDirectory`] and applies, in order, the
/// caller's filter, the regional-dialect filter and the script-marker filter.
/// Tags that do not parse are never removed by the last two.
pub struct LanguageMatcher {
    directory: Box<dyn LanguageDirectory>,
    options: MatcherOptions,
    filter: Option<CandidateFilter>,
    aliases: HashMap<String, String>,
}

impl LanguageMatcher {
    #[must_use]
    pub fn new(directory: Box<dyn LanguageDirectory>, options: MatcherOptions) -> Self {
        Self {
            directory,
            options,
            filter: None,
            aliases: HashMap::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut MatcherOptions {
        &mut self.options
    }

    /// Keeps only candidates for which `filter` returns true.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&LanguageCandidate) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Registers the name a tag should be shown with once selected.
    pub fn register_alias(&mut self, tag: &str, name: &str) {
        self.aliases.insert(tag.to_ascii_lowercase(), name.to_string());
    }

    /// Hides the generic Chinese entries and names `zh-CN`/`zh-TW` as
    /// simplified and traditional Chinese.
    pub fn use_simplified_chinese(&mut self) {
        self.set_filter(|c| {
            !SIMPLIFIED_CHINESE_HIDDEN
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&c.language_tag))
        });
        for (tag, name) in SIMPLIFIED_CHINESE_ALIASES {
            self.register_alias(tag, name);
        }
    }

    /// A selection tracker sharing this matcher's label and aliases.
    #[must_use]
    pub fn new_selection(&self) -> LanguageSelection {
        let mut selection = LanguageSelection::new(&self.options.unlisted_language_label);
        for (tag, name) in &self.aliases {
            selection.register_alias(tag, name);
        }
        selection
    }

    /// Candidates for `query`, filtered for display.
    pub fn suggest(&self, query: &str) -> LookupResult<Vec<LanguageCandidate>> {
        let query = query.trim();
        if query == "?" {
            return Ok(vec![LanguageCandidate::new(
                UNLISTED_LANGUAGE,
                &[self.options.unlisted_language_label.as_str()],
            )]);
        }
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.directory.suggest(query)?;
        let total = found.len();
        let shown: Vec<LanguageCandidate> = found
            .into_iter()
            .filter(|c| self.filter.as_ref().is_none_or(|f| f(c)))
            .filter(|c| self.options.include_regional_dialects || !is_hidden_regional(c))
            .filter(|c| self.options.include_script_markers || !has_script(c))
            .collect();
        debug!(query = %query, found = total, shown = shown.len(), "Language lookup");
        Ok(shown)
    }
}

fn is_hidden_regional(candidate: &LanguageCandidate) -> bool {
    if ALWAYS_SHOWN_REGIONAL_TAGS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&candidate.language_tag))
    {
        return false;
    }
    TagParts::parse(&candidate.language_tag).is_some_and(|p| p.region.is_some())
}

fn has_script(candidate: &LanguageCandidate) -> bool {
    TagParts::parse(&candidate.language_tag).is_some_and(|p| p.script.is_some())
}

/// The region a candidate belongs to: its tag's region, else whatever
/// `lookup` answers, else an empty string.
#[must_use]
pub fn candidate_region(candidate: &LanguageCandidate, lookup: &dyn RegionLookup) -> String {
    region_or_empty(lookup, &candidate.language_tag)
}
