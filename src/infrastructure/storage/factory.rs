//! Storage factory for runtime backend selection

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::storage::{BlobStore, Storage, StorageEntity};
use crate::domain::DomainError;

use super::filesystem::FileSystemBlobStore;
use super::in_memory::InMemoryStorage;
use super::in_memory_blob::InMemoryBlobStore;

/// Supported blob store types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// One file per blob under a root directory
    FileSystem,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "filesystem" | "file" | "fs" => Some(Self::FileSystem),
            _ => None,
        }
    }
}

/// Blob store configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory blob store
    InMemory,
    /// Filesystem blob store rooted at the given directory
    FileSystem(PathBuf),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn filesystem(root: impl Into<PathBuf>) -> Self {
        Self::FileSystem(root.into())
    }

    /// Build a configuration from a backend name and root directory
    pub fn from_backend(backend: &str, root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        match StorageType::from_str(backend) {
            Some(StorageType::InMemory) => Ok(Self::InMemory),
            Some(StorageType::FileSystem) => Ok(Self::FileSystem(root.into())),
            None => Err(DomainError::configuration(format!(
                "Unknown storage backend: {}",
                backend
            ))),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::FileSystem(_) => StorageType::FileSystem,
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a blob store based on the configuration
    pub async fn create_blob_store(
        config: &StorageConfig,
    ) -> Result<Arc<dyn BlobStore>, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryBlobStore::new())),
            StorageConfig::FileSystem(root) => {
                Ok(Arc::new(FileSystemBlobStore::open(root.clone()).await?))
            }
        }
    }

    /// Creates an in-memory metadata storage
    pub fn create_in_memory<E>() -> Arc<InMemoryStorage<E>>
    where
        E: StorageEntity,
    {
        Arc::new(InMemoryStorage::new())
    }

    /// Creates metadata storage as a trait object
    pub fn create_metadata_storage<E>() -> Arc<dyn Storage<E>>
    where
        E: StorageEntity + 'static,
    {
        Arc::new(InMemoryStorage::<E>::new())
    }
}
