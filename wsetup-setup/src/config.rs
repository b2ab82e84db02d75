//! TOML configuration for the setup model and lookup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wsetup_lookup::MatcherOptions;
use wsetup_store::DEFAULT_NEW_ABBREVIATION;

use crate::error::{SetupError, SetupResult};

fn default_new_abbreviation() -> String {
    DEFAULT_NEW_ABBREVIATION.to_string()
}

fn default_unlisted_abbreviation() -> String {
    "v".to_string()
}

/// Settings for collection editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSection {
    /// Abbreviation given to definitions created without a bootstrap.
    #[serde(default = "default_new_abbreviation")]
    pub new_definition_abbreviation: String,
    /// Replaces an abbreviation equal to the unlisted language code `qaa`.
    #[serde(default = "default_unlisted_abbreviation")]
    pub unlisted_language_abbreviation: String,
    /// Tags offered under "Other Languages" in the tree.
    #[serde(default)]
    pub other_known_languages: Vec<String>,
}

impl Default for SetupSection {
    fn default() -> Self {
        Self {
            new_definition_abbreviation: default_new_abbreviation(),
            unlisted_language_abbreviation: default_unlisted_abbreviation(),
            other_known_languages: Vec::new(),
        }
    }
}

/// Complete configuration file.
///
/// ```toml
/// [lookup]
/// include_regional_dialects = false
/// include_script_markers = false
/// unlisted_language_label = "Unlisted Language"
///
/// [setup]
/// new_definition_abbreviation = "New"
/// unlisted_language_abbreviation = "v"
/// other_known_languages = ["en", "fr"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub lookup: MatcherOptions,
    #[serde(default)]
    pub setup: SetupSection,
}

impl SetupConfig {
    /// Parses configuration text.
    pub fn from_toml_str(text: &str) -> SetupResult<Self> {
        toml::from_str(text).map_err(|e| SetupError::Config(e.to_string()))
    }

    /// Loads configuration from `path`. A missing, unreadable or invalid
    /// file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No setup config found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded setup config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse setup config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read setup config, using defaults");
                Self::default()
            }
        }
    }
}
