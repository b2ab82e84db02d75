//! Writing system setup model.
//!
//! The non-visual core behind the dialogs that create, edit, delete and
//! duplicate writing system definitions:
//! - [`WritingSystemSetupModel`]: the ordered collection being edited, its
//!   selection cursor, and every operation that adds, removes or saves
//! - [`CollationConfig`]: the collation-kind state machine for the selected
//!   definition
//! - [`SetupEvent`] listeners: synchronous change notifications with a fixed
//!   ordering contract
//! - [`SetupHost`]: decisions and messages that need the user
//! - [`WritingSystemTree`]: definitions grouped by base language
//! - [`SetupConfig`]: TOML configuration

mod collation;
mod config;
mod error;
mod events;
mod host;
mod model;
mod tree;

pub use collation::{
    CollationConfig, CollatorProvider, DefaultCollatorProvider, SortLanguage,
    prohibited_sort_tags, sort_language_options, test_sort,
};
pub use config::{SetupConfig, SetupSection};
pub use error::{SetupError, SetupResult};
pub use events::{SetupEvent, SubscriptionId};
pub use host::{Approval, DataDecision, DefaultHost, DeleteOutcome, SetupHost};
pub use model::WritingSystemSetupModel;
pub use tree::{OTHER_LANGUAGES_LABEL, TreeGroup, TreeItem, WritingSystemTree, build_groups};
