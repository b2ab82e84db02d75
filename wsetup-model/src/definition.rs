//! The writing system definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wsetup_tag::registry::{
    is_registered_variant, is_script_implied, is_valid_language_code, is_valid_private_use_token,
    is_valid_region_code, is_valid_script_code, title_case,
};
use wsetup_tag::{TagError, TagParts, TagResult, UNLISTED_LANGUAGE, split_variant_and_private_use};

use crate::collation::CollationDefinition;
use crate::ids::DefinitionId;

const IPA_VARIANT: &str = "fonipa";
const PHONETIC_MARKER: &str = "etic";
const PHONEMIC_MARKER: &str = "emic";
const VOICE_SCRIPT: &str = "Zxxx";
const VOICE_MARKER: &str = "audio";

/// Where a definition is in its life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Active,
    /// Chosen for deletion; the host has not confirmed yet.
    PendingDeletion,
    Deleted,
}

/// IPA transcription flavour, derived from `fonipa` plus `etic`/`emic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpaStatus {
    #[default]
    NotIpa,
    Ipa,
    Phonetic,
    Phonemic,
}

/// Which special-purpose identifier editor applies to a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialSelection {
    None,
    Ipa,
    Voice,
    ScriptRegionVariant,
    UnlistedLanguageDetails,
}

/// One writing system: identity parts, descriptive settings and collation.
///
/// The language tag is never stored; it is composed from the parts on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingSystemDefinition {
    id: DefinitionId,
    #[serde(rename = "language_tag")]
    parts: TagParts,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub default_font_name: String,
    #[serde(default)]
    pub default_font_size: f32,
    #[serde(default)]
    pub keyboard: String,
    #[serde(default)]
    pub right_to_left: bool,
    #[serde(default)]
    pub spell_checking_id: String,
    #[serde(default)]
    pub version_number: String,
    #[serde(default)]
    pub version_description: String,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub collation: CollationDefinition,
    #[serde(skip)]
    pub lifecycle: Lifecycle,
}

impl WritingSystemDefinition {
    /// Creates a definition for `tag` with a fresh identity.
    pub fn new(tag: &str) -> TagResult<Self> {
        let parts = tag.parse::<TagParts>()?;
        Ok(Self::from_parts(parts))
    }

    /// Creates a definition from already-validated parts.
    #[must_use]
    pub fn from_parts(parts: TagParts) -> Self {
        Self {
            id: DefinitionId::new(),
            parts,
            abbreviation: String::new(),
            language_name: String::new(),
            default_font_name: String::new(),
            default_font_size: 0.0,
            keyboard: String::new(),
            right_to_left: false,
            spell_checking_id: String::new(),
            version_number: String::new(),
            version_description: String::new(),
            date_modified: None,
            collation: CollationDefinition::default(),
            lifecycle: Lifecycle::Active,
        }
    }

    /// A copy with a fresh identity, ready to be given a new tag.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: DefinitionId::new(),
            lifecycle: Lifecycle::Active,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn id(&self) -> DefinitionId {
        self.id
    }

    /// Takes every setting and identity part from `other` but keeps this
    /// definition's store identity and lifecycle.
    pub fn replace_keeping_identity(&mut self, other: Self) {
        let id = self.id;
        let lifecycle = self.lifecycle;
        *self = Self {
            id,
            lifecycle,
            ..other
        };
    }

    /// The composed language tag.
    #[must_use]
    pub fn language_tag(&self) -> String {
        self.parts.to_string()
    }

    #[must_use]
    pub fn parts(&self) -> &TagParts {
        &self.parts
    }

    /// Replaces every identity part from `tag`. Leaves the definition
    /// unchanged when the tag does not parse.
    pub fn set_language_tag(&mut self, tag: &str) -> TagResult<()> {
        self.parts = tag.parse()?;
        Ok(())
    }

    pub fn set_parts(&mut self, parts: TagParts) {
        self.parts = parts;
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.parts.language
    }

    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.parts.script.as_deref()
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.parts.region.as_deref()
    }

    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.parts.variants
    }

    #[must_use]
    pub fn private_use(&self) -> &[String] {
        &self.parts.private_use
    }

    /// Combined variant field, e.g. `fonipa-x-etic`.
    #[must_use]
    pub fn variant_field(&self) -> String {
        self.parts.variant_field()
    }

    pub fn set_language(&mut self, code: &str) -> TagResult<()> {
        if !is_valid_language_code(code) {
            return Err(TagError::InvalidTag(code.to_string()));
        }
        self.parts.language = code.to_ascii_lowercase();
        Ok(())
    }

    /// Sets or clears the script. An empty string clears it.
    pub fn set_script(&mut self, script: &str) -> TagResult<()> {
        self.parts.script = match script.trim() {
            "" => None,
            s if is_valid_script_code(s) => Some(title_case(s)),
            s => return Err(TagError::InvalidTag(s.to_string())),
        };
        Ok(())
    }

    /// Sets or clears the region. An empty string clears it.
    pub fn set_region(&mut self, region: &str) -> TagResult<()> {
        self.parts.region = match region.trim() {
            "" => None,
            r if is_valid_region_code(r) => Some(r.to_ascii_uppercase()),
            r => return Err(TagError::InvalidTag(r.to_string())),
        };
        Ok(())
    }

    /// Replaces variants and private use from a combined field such as
    /// `fonipa-x-etic`. Every token before `x` must be a registered variant.
    pub fn set_variant_field(&mut self, field: &str) -> TagResult<()> {
        let (variants, private_use) = split_variant_and_private_use(field);
        if let Some(bad) = variants.iter().find(|v| !is_registered_variant(v)) {
            return Err(TagError::InvalidVariant(bad.clone()));
        }
        if let Some(bad) = private_use.iter().find(|t| !is_valid_private_use_token(t)) {
            return Err(TagError::InvalidVariant(bad.clone()));
        }
        let mut lowered: Vec<String> = Vec::new();
        for v in variants {
            let v = v.to_ascii_lowercase();
            if lowered.contains(&v) {
                return Err(TagError::InvalidVariant(v));
            }
            lowered.push(v);
        }
        if field.split('-').any(|t| t.eq_ignore_ascii_case("x")) && private_use.is_empty() {
            return Err(TagError::InvalidVariant(field.to_string()));
        }
        self.parts.variants = lowered;
        self.parts.private_use = private_use;
        Ok(())
    }

    /// Audio writing system: script `Zxxx` with private use `audio`.
    #[must_use]
    pub fn is_voice(&self) -> bool {
        self.script()
            .is_some_and(|s| s.eq_ignore_ascii_case(VOICE_SCRIPT))
            && self.parts.has_private_use(VOICE_MARKER)
    }

    /// Turning voice on removes every IPA marker.
    pub fn set_is_voice(&mut self, voice: bool) {
        if voice {
            self.remove_ipa_markers();
            self.parts.script = Some(VOICE_SCRIPT.to_string());
            if !self.parts.has_private_use(VOICE_MARKER) {
                self.parts.private_use.push(VOICE_MARKER.to_string());
            }
        } else {
            self.parts.private_use.retain(|t| !t.eq_ignore_ascii_case(VOICE_MARKER));
            if self.script().is_some_and(|s| s.eq_ignore_ascii_case(VOICE_SCRIPT)) {
                self.parts.script = None;
            }
        }
    }

    #[must_use]
    pub fn ipa_status(&self) -> IpaStatus {
        if !self.parts.has_variant(IPA_VARIANT) {
            IpaStatus::NotIpa
        } else if self.parts.has_private_use(PHONETIC_MARKER) {
            IpaStatus::Phonetic
        } else if self.parts.has_private_use(PHONEMIC_MARKER) {
            IpaStatus::Phonemic
        } else {
            IpaStatus::Ipa
        }
    }

    /// Any IPA status other than `NotIpa` removes the voice markers.
    pub fn set_ipa_status(&mut self, status: IpaStatus) {
        if status == self.ipa_status() {
            return;
        }
        self.remove_ipa_markers();
        if status == IpaStatus::NotIpa {
            return;
        }
        if self.is_voice() {
            self.set_is_voice(false);
        }
        self.parts.variants.insert(0, IPA_VARIANT.to_string());
        match status {
            IpaStatus::Phonetic => self.parts.private_use.insert(0, PHONETIC_MARKER.to_string()),
            IpaStatus::Phonemic => self.parts.private_use.insert(0, PHONEMIC_MARKER.to_string()),
            IpaStatus::Ipa | IpaStatus::NotIpa => {}
        }
    }

    fn remove_ipa_markers(&mut self) {
        self.parts.variants.retain(|v| !v.eq_ignore_ascii_case(IPA_VARIANT));
        self.parts.private_use.retain(|t| {
            !t.eq_ignore_ascii_case(PHONETIC_MARKER) && !t.eq_ignore_ascii_case(PHONEMIC_MARKER)
        });
    }

    /// The special identifier editor that fits this definition.
    #[must_use]
    pub fn special_selection(&self) -> SpecialSelection {
        if self.is_voice() {
            return SpecialSelection::Voice;
        }
        let script_implied = self
            .script()
            .is_none_or(|s| is_script_implied(self.language(), s));
        if self.ipa_status() != IpaStatus::NotIpa && script_implied {
            return SpecialSelection::Ipa;
        }
        if self.language().eq_ignore_ascii_case(UNLISTED_LANGUAGE) {
            return SpecialSelection::UnlistedLanguageDetails;
        }
        if self.parts.specificity() > 0 {
            return SpecialSelection::ScriptRegionVariant;
        }
        SpecialSelection::None
    }

    /// Name shown in lists: the language name when known, else the
    /// abbreviation, else the tag.
    #[must_use]
    pub fn display_label(&self) -> String {
        if !self.language_name.trim().is_empty() {
            self.language_name.clone()
        } else if !self.abbreviation.trim().is_empty() {
            self.abbreviation.clone()
        } else {
            self.language_tag()
        }
    }
}
