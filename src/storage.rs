//! Configuration file storage
//!
//! One plain-text file per device, stored flat in a directory. The store
//! only moves whole files; it never looks inside them.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StorageError;

/// File extension of device configuration files
pub const DEFAULT_EXTENSION: &str = ".cfg";

/// Abstract access to the configuration files
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Names of all configuration files
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Full text of one file
    async fn read(&self, name: &str) -> Result<String, StorageError>;

    /// Replace the full text of one file, creating it if needed
    async fn write(&self, name: &str, text: &str) -> Result<(), StorageError>;
}

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct LocalConfigStore {
    root: PathBuf,
    extension: String,
}

impl LocalConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        info!("Config directory ready: {}", self.root.display());
        Ok(())
    }

    /// Resolve a file name inside the root, refusing anything that could
    /// leave the directory.
    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let escapes = name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');
        if escapes {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ConfigStore for LocalConfigStore {
    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(&self.extension) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<String, StorageError> {
        let path = self.path_for(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(file = name, bytes = text.len(), "read config");
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, name: &str, text: &str) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, text).await?;
        info!(file = name, bytes = text.len(), "wrote config");
        Ok(())
    }
}

/// In-memory store (for testing)
#[cfg(test)]
pub struct InMemoryConfigStore {
    files: tokio::sync::RwLock<std::collections::BTreeMap<String, String>>,
}

#[cfg(test)]
impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self {
            files: tokio::sync::RwLock::new(std::collections::BTreeMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.files.read().await.keys().cloned().collect())
    }

    async fn read(&self, name: &str) -> Result<String, StorageError> {
        self.files
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn write(&self, name: &str, text: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .await
            .insert(name.to_string(), text.to_string());
        Ok(())
    }
}
