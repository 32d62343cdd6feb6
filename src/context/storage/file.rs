use super::ContextStorage;
use crate::context::store::ConfigurationStore;
use crate::error::StoreError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// TOML file storage with temp-and-rename writes.
#[derive(Debug, Clone)]
pub struct FileContextStorage {
    path: PathBuf,
}

impl FileContextStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContextStorage for FileContextStorage {
    fn load(&self) -> Result<ConfigurationStore, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store file missing, starting empty");
            return Ok(ConfigurationStore::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let store: ConfigurationStore =
            toml::from_str(&content).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        store.check_invariants().map_err(|message| StoreError::Parse {
            path: self.path.clone(),
            message,
        })?;

        debug!(path = %self.path.display(), contexts = store.len(), "Loaded store");
        Ok(store)
    }

    fn save(&self, store: &ConfigurationStore) -> Result<(), StoreError> {
        let content =
            toml::to_string_pretty(store).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let mut temp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), contexts = store.len(), "Saved store");
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
