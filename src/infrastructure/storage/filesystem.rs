//! Filesystem blob store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::content::RawContent;
use crate::domain::storage::BlobStore;
use crate::domain::DomainError;

/// Blob store writing one file per key under a root directory.
///
/// Keys are single path components. Creates and deletes hold the write side
/// of `lock` and reads hold the read side, so a reader never sees a blob that
/// is still being written or removed.
#[derive(Debug)]
pub struct FileSystemBlobStore {
    root: PathBuf,
    lock: RwLock<()>,
}

impl FileSystemBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            DomainError::blob_storage(format!(
                "Failed to create blob directory '{}': {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, DomainError> {
        let invalid = key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || Path::new(key).is_absolute();

        if invalid {
            return Err(DomainError::validation(format!("Invalid blob key: '{}'", key)));
        }

        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    async fn get(&self, path: &str) -> Result<Option<Bytes>, DomainError> {
        let file = self.resolve(path)?;
        let _guard = self.lock.read().await;

        match fs::read(&file).await {
            Ok(bytes) => Ok(Some(Bytes::from(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::blob_storage(format!(
                "Failed to read blob '{}': {}",
                path, e
            ))),
        }
    }

    async fn create(&self, path: &str, content: &RawContent) -> Result<(), DomainError> {
        let file = self.resolve(path)?;
        let _guard = self.lock.write().await;

        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    DomainError::blob_storage(format!("Blob '{}' already exists", path))
                }
                _ => DomainError::blob_storage(format!("Failed to create blob '{}': {}", path, e)),
            })?;

        let written = async {
            handle.write_all(content.as_bytes()).await?;
            handle.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(handle);
            let _ = fs::remove_file(&file).await;
            return Err(DomainError::blob_storage(format!(
                "Failed to write blob '{}': {}",
                path, e
            )));
        }

        debug!(key = %path, size = content.len(), "Blob written");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let file = self.resolve(path)?;
        let _guard = self.lock.write().await;

        fs::remove_file(&file).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                DomainError::blob_storage(format!("Blob '{}' does not exist", path))
            }
            _ => DomainError::blob_storage(format!("Failed to delete blob '{}': {}", path, e)),
        })
    }

    fn backend(&self) -> &'static str {
        "filesystem"
    }
}
