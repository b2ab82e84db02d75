//! Writing system definition model.
//!
//! Defines the types every other setup crate depends on:
//! - [`WritingSystemDefinition`]: identity parts, descriptive settings,
//!   collation and lifecycle of one writing system
//! - [`DefinitionId`]: stable store identity that survives tag changes
//! - [`CollationDefinition`] / [`CollationKind`]: the mutually exclusive
//!   collation variants and the user-facing kind derived from them
//! - [`SimpleRules`] / [`SimpleRulesCollator`]: parsing, validation and
//!   sort keys for Shoebox-style simple collation rules
//! - [`Collator`]: capability producing sort keys

mod collation;
mod collator;
mod definition;
mod ids;
mod simple_rules;

pub use collation::{CollationDefinition, CollationKind, IcuImport, default_custom_simple_rules};
pub use collator::{Collator, SortKey};
pub use definition::{IpaStatus, Lifecycle, SpecialSelection, WritingSystemDefinition};
pub use ids::DefinitionId;
pub use simple_rules::{SimpleRules, SimpleRulesCollator};
