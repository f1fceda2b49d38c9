use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use log::debug;
use crate::modules::error::WorkflowError;

// Key/value string store standing in for browser local storage.
// Every write flushes the whole map back to disk; there is no partial write.
pub struct LocalStore {
    // Backing file, None for a purely in-memory store
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStore {
    // Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| WorkflowError::StorageError(format!("{}: {}", path.display(), e)))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| WorkflowError::JsonDeserializationError(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!("Opened local store {} with {} keys", path.display(), items.len());
        Ok(Self { path: Some(path), items })
    }

    pub fn in_memory() -> Self {
        Self { path: None, items: BTreeMap::new() }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: String) -> Result<(), WorkflowError> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<(), WorkflowError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), WorkflowError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| WorkflowError::StorageError(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.items)
            .map_err(|e| WorkflowError::JsonSerializationError(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| WorkflowError::StorageError(format!("{}: {}", path.display(), e)))
    }
}
