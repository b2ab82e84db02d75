//! Collation definitions and the user-facing collation kind.

use serde::{Deserialize, Serialize};
use wsetup_tag::TagParts;

use crate::simple_rules::SimpleRules;

/// Reference to a collation defined elsewhere, pulled into ICU rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcuImport {
    pub language_tag: String,
    #[serde(default)]
    pub collation_type: String,
}

/// How a writing system sorts. Exactly one variant is active at a time;
/// switching variants discards the previous variant's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollationDefinition {
    /// ICU tailoring. Empty rules with no imports means default ordering.
    Icu {
        #[serde(default)]
        rules: String,
        #[serde(default)]
        imports: Vec<IcuImport>,
    },
    /// Shoebox-style simple rules.
    Simple {
        #[serde(default)]
        rules: String,
    },
    /// Sort the same way as another language.
    System { language_tag: String },
}

impl Default for CollationDefinition {
    fn default() -> Self {
        Self::Icu {
            rules: String::new(),
            imports: Vec::new(),
        }
    }
}

impl CollationDefinition {
    /// Checks that the rules can be used. The message is meant for the user.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Icu { rules, imports } => {
                validate_icu_syntax(rules)?;
                if let Some(bad) = imports.iter().find(|i| !TagParts::is_valid(&i.language_tag)) {
                    return Err(format!(
                        "The imported collation '{}' does not name a valid language.",
                        bad.language_tag
                    ));
                }
                Ok(())
            }
            Self::Simple { rules } => SimpleRules::parse(rules).map(|_| ()),
            Self::System { language_tag } => {
                if language_tag.trim().is_empty() {
                    Err("No language has been chosen to sort like.".to_string())
                } else if TagParts::is_valid(language_tag) {
                    Ok(())
                } else {
                    Err(format!("The language tag '{language_tag}' is not valid."))
                }
            }
        }
    }
}

/// Minimal structural check of ICU rule text: balanced brackets and closed
/// quotes. Full validation needs an ICU collator.
fn validate_icu_syntax(rules: &str) -> Result<(), String> {
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut chars = rules.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if !in_quote => {
                if chars.next().is_none() {
                    return Err("ICU rules end with an incomplete escape.".to_string());
                }
            }
            '\'' => in_quote = !in_quote,
            '[' if !in_quote => depth += 1,
            ']' if !in_quote => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "ICU rules contain an unmatched ']'.".to_string())?;
            }
            _ => {}
        }
    }
    if in_quote {
        return Err("ICU rules contain an unterminated quote.".to_string());
    }
    if depth > 0 {
        return Err("ICU rules contain an unmatched '['.".to_string());
    }
    Ok(())
}

/// User-facing collation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollationKind {
    DefaultOrdering,
    CustomSimple,
    CustomIcu,
    OtherLanguage,
}

impl CollationKind {
    /// Every kind with its display label, in menu order.
    pub const ALL: [(Self, &'static str); 4] = [
        (Self::DefaultOrdering, "Default Ordering"),
        (Self::CustomSimple, "Custom Simple (Shoebox style) rules"),
        (Self::CustomIcu, "Custom ICU rules"),
        (Self::OtherLanguage, "Same as another language"),
    ];

    /// Display label for the kind.
    #[must_use]
    pub fn label(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("", |(_, label)| label)
    }

    /// Derives the kind from a stored definition. ICU collation with neither
    /// rules nor imports is the default ordering.
    #[must_use]
    pub fn of(collation: &CollationDefinition) -> Self {
        match collation {
            CollationDefinition::Icu { rules, imports } if rules.is_empty() && imports.is_empty() => {
                Self::DefaultOrdering
            }
            CollationDefinition::Icu { .. } => Self::CustomIcu,
            CollationDefinition::Simple { .. } => Self::CustomSimple,
            CollationDefinition::System { .. } => Self::OtherLanguage,
        }
    }

    /// A fresh collation definition of this kind with no rules.
    #[must_use]
    pub fn empty_definition(self) -> CollationDefinition {
        match self {
            Self::DefaultOrdering | Self::CustomIcu => CollationDefinition::default(),
            Self::CustomSimple => CollationDefinition::Simple {
                rules: String::new(),
            },
            Self::OtherLanguage => CollationDefinition::System {
                language_tag: String::new(),
            },
        }
    }
}

/// Starting template for custom simple rules: `A a` through `Z z`, one pair
/// per line.
#[must_use]
pub fn default_custom_simple_rules() -> String {
    ('A'..='Z')
        .map(|upper| format!("{upper} {}", upper.to_ascii_lowercase()))
        .collect::<Vec<_>>()
        .join("\n")
}
