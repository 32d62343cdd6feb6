//! Persistence port for the configuration store.

use crate::context::store::ConfigurationStore;
use crate::error::StoreError;
use std::path::Path;

mod file;

pub use file::FileContextStorage;

/// Load/save collaborator. One load and at most one save per command invocation.
pub trait ContextStorage: Send + Sync {
    /// Load the store; a missing backing file is an empty store.
    fn load(&self) -> Result<ConfigurationStore, StoreError>;

    /// Persist the whole store. On error the previously saved state stays intact.
    fn save(&self, store: &ConfigurationStore) -> Result<(), StoreError>;

    fn location(&self) -> &Path;
}
