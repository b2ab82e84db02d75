//! Writing system repositories.
//!
//! The setup model only ever talks to storage through the narrow
//! [`WritingSystemRepository`] trait. Two implementations are provided:
//! [`MemoryRepository`] for hosts that persist elsewhere (and for tests) and
//! [`FolderRepository`], which keeps one JSON file per definition.
//! Single-file import and export go through a [`DefinitionMapper`].

mod error;
mod folder;
mod mapper;
mod memory;
mod repository;

pub use error::{StoreError, StoreResult};
pub use folder::FolderRepository;
pub use mapper::{DefinitionMapper, JsonDefinitionMapper, WriteOptions};
pub use memory::{Conflation, MemoryRepository};
pub use repository::{DEFAULT_NEW_ABBREVIATION, WritingSystemRepository};
