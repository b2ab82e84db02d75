//! Folder-backed repository: one JSON file per definition.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use wsetup_model::{DefinitionId, WritingSystemDefinition};

use crate::error::{StoreError, StoreResult};
use crate::mapper::{DefinitionMapper, JsonDefinitionMapper, WriteOptions};
use crate::memory::MemoryRepository;
use crate::repository::WritingSystemRepository;

const FILE_EXTENSION: &str = "json";

/// Repository persisted as `<id>.json` files in a folder.
///
/// Changes stay in memory until [`save`](WritingSystemRepository::save),
/// which writes every definition and deletes files of removed ones.
#[derive(Debug)]
pub struct FolderRepository {
    root: PathBuf,
    inner: MemoryRepository,
    mapper: JsonDefinitionMapper,
}

impl FolderRepository {
    /// Opens (creating if needed) the folder at `root` and loads every
    /// definition file in it.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let mapper = JsonDefinitionMapper;
        let mut inner = MemoryRepository::open_in_memory();
        for path in definition_files(&root)? {
            let definition = mapper.load(&path)?;
            inner.insert_loaded(definition).map_err(|e| {
                StoreError::InvalidData(format!("{}: {e}", path.display()))
            })?;
        }

        info!(path = %root.display(), count = inner.len(), "Opened writing system folder");
        Ok(Self {
            root,
            inner,
            mapper,
        })
    }

    /// The folder backing this repository.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, id: DefinitionId) -> PathBuf {
        self.root.join(format!("{id}.{FILE_EXTENSION}"))
    }
}

/// Definition files in `root`, sorted by name so load order is stable.
fn definition_files(root: &Path) -> StoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == FILE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl WritingSystemRepository for FolderRepository {
    fn all_tags(&self) -> Vec<String> {
        self.inner.all_tags()
    }

    fn all_definitions(&self) -> Vec<WritingSystemDefinition> {
        self.inner.all_definitions()
    }

    fn contains_id(&self, id: DefinitionId) -> bool {
        self.inner.contains_id(id)
    }

    fn can_set(&self, definition: &WritingSystemDefinition) -> bool {
        self.inner.can_set(definition)
    }

    fn set(&mut self, definition: &WritingSystemDefinition) -> StoreResult<()> {
        self.inner.set(definition)
    }

    fn remove(&mut self, id: DefinitionId) -> StoreResult<()> {
        self.inner.remove(id)
    }

    fn conflate(&mut self, source_tag: &str, target_tag: &str) -> StoreResult<()> {
        self.inner.conflate(source_tag, target_tag)
    }

    fn save(&mut self) -> StoreResult<()> {
        let options = WriteOptions {
            pretty: true,
            update_modified_date: false,
        };
        let definitions = self.inner.all_definitions();
        let mut kept: HashSet<PathBuf> = HashSet::new();
        for definition in &definitions {
            let path = self.file_for(definition.id());
            self.mapper.write(&path, definition, &options)?;
            kept.insert(path);
        }

        for path in definition_files(&self.root)? {
            if !kept.contains(&path) {
                if let Err(e) = fs::remove_file(&path) {
                    warn!(path = %path.display(), error = %e, "Failed to delete stale writing system file");
                }
            }
        }

        self.inner.save()?;
        info!(path = %self.root.display(), count = definitions.len(), "Saved writing systems");
        Ok(())
    }
}
