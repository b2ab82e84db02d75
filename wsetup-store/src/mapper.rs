//! Single-definition file formats.

use std::fs;
use std::path::Path;

use chrono::Utc;
use wsetup_model::WritingSystemDefinition;

use crate::error::StoreResult;

/// Options for writing a definition file.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indent the output.
    pub pretty: bool,
    /// Stamp the written copy with the current time.
    pub update_modified_date: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            update_modified_date: true,
        }
    }
}

/// Reads and writes one definition per file.
pub trait DefinitionMapper {
    /// Fills `definition` from the file at `path`. The definition keeps its
    /// own store identity.
    fn read(&self, path: &Path, definition: &mut WritingSystemDefinition) -> StoreResult<()>;

    /// Writes `definition` to `path`.
    fn write(
        &self,
        path: &Path,
        definition: &WritingSystemDefinition,
        options: &WriteOptions,
    ) -> StoreResult<()>;
}

/// JSON definition files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDefinitionMapper;

impl JsonDefinitionMapper {
    /// Loads a definition exactly as stored, identity included.
    pub fn load(&self, path: &Path) -> StoreResult<WritingSystemDefinition> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl DefinitionMapper for JsonDefinitionMapper {
    fn read(&self, path: &Path, definition: &mut WritingSystemDefinition) -> StoreResult<()> {
        let loaded = self.load(path)?;
        definition.replace_keeping_identity(loaded);
        Ok(())
    }

    fn write(
        &self,
        path: &Path,
        definition: &WritingSystemDefinition,
        options: &WriteOptions,
    ) -> StoreResult<()> {
        let json = if options.update_modified_date {
            let mut stamped = definition.clone();
            stamped.date_modified = Some(Utc::now());
            to_json(&stamped, options.pretty)?
        } else {
            to_json(definition, options.pretty)?
        };
        fs::write(path, json)?;
        Ok(())
    }
}

fn to_json(definition: &WritingSystemDefinition, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(definition)
    } else {
        serde_json::to_string(definition)
    }
}
