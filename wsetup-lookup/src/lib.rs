//! Language lookup for the writing system setup dialogs.
//!
//! - [`LanguageDirectory`]: capability answering free-text queries with
//!   [`LanguageCandidate`]s; [`MemoryDirectory`] is an in-memory inventory
//! - [`LanguageMatcher`]: applies the caller's filter and the
//!   regional-dialect and script-marker display policy to directory results
//! - [`LanguageSelection`]: tracks the chosen candidate and the name the user
//!   wants to call the language

mod candidate;
mod directory;
mod error;
mod matcher;
mod selection;

pub use candidate::LanguageCandidate;
pub use directory::{LanguageDirectory, MemoryDirectory};
pub use error::{LookupError, LookupResult};
pub use matcher::{
    DEFAULT_UNLISTED_LANGUAGE_LABEL, LanguageMatcher, MatcherOptions, candidate_region,
};
pub use selection::LanguageSelection;
