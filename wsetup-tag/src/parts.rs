//! Structured view of a language tag.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TagError;
use crate::registry::{
    is_registered_variant, is_valid_language_code, is_valid_private_use_token,
    is_valid_region_code, is_valid_script_code, title_case,
};

/// The subtags of a language tag, kept separately so that a composed tag can
/// never disagree with its parts.
///
/// Parsing is strict: `language[-Script][-REGION][-variant...][-x-private...]`
/// where variants must be registered. Extensions other than private use are
/// not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagParts {
    pub language: String,
    pub script: Option<String>,
    pub region: Option<String>,
    pub variants: Vec<String>,
    pub private_use: Vec<String>,
}

impl TagParts {
    /// Creates parts holding only a language subtag.
    #[must_use]
    pub fn language_only(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Parses a tag, canonicalising the case of each subtag.
    /// Returns `None` when the text is not well formed.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let tokens: Vec<&str> = tag.trim().split('-').collect();
        if tokens.iter().any(|t| t.is_empty()) {
            return None;
        }

        let mut iter = tokens.into_iter().peekable();
        let language = iter.next()?;
        if !is_valid_language_code(language) {
            return None;
        }
        let mut parts = Self::language_only(language);

        if let Some(token) = iter.next_if(|t| is_valid_script_code(t)) {
            parts.script = Some(title_case(token));
        }
        if let Some(token) = iter.next_if(|t| is_valid_region_code(t)) {
            parts.region = Some(token.to_ascii_uppercase());
        }

        while let Some(token) = iter.next() {
            if token.eq_ignore_ascii_case("x") {
                parts.private_use = iter.by_ref().map(str::to_string).collect();
                if parts.private_use.is_empty()
                    || !parts.private_use.iter().all(|t| is_valid_private_use_token(t))
                {
                    return None;
                }
                break;
            }
            if !is_registered_variant(token)
                || parts.variants.iter().any(|v| v.eq_ignore_ascii_case(token))
            {
                return None;
            }
            parts.variants.push(token.to_ascii_lowercase());
        }

        Some(parts)
    }

    /// Whether `tag` parses.
    #[must_use]
    pub fn is_valid(tag: &str) -> bool {
        Self::parse(tag).is_some()
    }

    /// The variant and private-use sections joined the way they appear in a tag,
    /// e.g. `fonipa-x-etic`.
    #[must_use]
    pub fn variant_field(&self) -> String {
        crate::concatenate_variant_and_private_use(&self.variants, &self.private_use)
    }

    /// Whether the private-use section contains `token` (case-insensitive).
    #[must_use]
    pub fn has_private_use(&self, token: &str) -> bool {
        self.private_use.iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    /// Whether the variant section contains `token` (case-insensitive).
    #[must_use]
    pub fn has_variant(&self, token: &str) -> bool {
        self.variants.iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    /// Number of script, region and variant fields that are present.
    #[must_use]
    pub fn specificity(&self) -> usize {
        usize::from(self.script.is_some())
            + usize::from(self.region.is_some())
            + usize::from(!self.variants.is_empty() || !self.private_use.is_empty())
    }
}

impl fmt::Display for TagParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        for variant in &self.variants {
            write!(f, "-{variant}")?;
        }
        if !self.private_use.is_empty() {
            f.write_str("-x")?;
            for token in &self.private_use {
                write!(f, "-{token}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for TagParts {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TagError::InvalidTag(s.to_string()))
    }
}

impl Serialize for TagParts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagParts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).ok_or_else(|| de::Error::custom(TagError::InvalidTag(text)))
    }
}
