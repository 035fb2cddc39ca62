//! In-memory blob store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::content::RawContent;
use crate::domain::storage::BlobStore;
use crate::domain::DomainError;

/// Blob store keeping content in a map.
///
/// Content is held as `Bytes`, so reads share the stored buffer.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, path: &str) -> Result<Option<Bytes>, DomainError> {
        let blobs = self.blobs.read().map_err(|e| {
            DomainError::blob_storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(blobs.get(path).cloned())
    }

    async fn create(&self, path: &str, content: &RawContent) -> Result<(), DomainError> {
        let mut blobs = self.blobs.write().map_err(|e| {
            DomainError::blob_storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if blobs.contains_key(path) {
            return Err(DomainError::blob_storage(format!(
                "Blob '{}' already exists",
                path
            )));
        }

        blobs.insert(path.to_string(), content.bytes());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let mut blobs = self.blobs.write().map_err(|e| {
            DomainError::blob_storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match blobs.remove(path) {
            Some(_) => Ok(()),
            None => Err(DomainError::blob_storage(format!(
                "Blob '{}' does not exist",
                path
            ))),
        }
    }

    fn backend(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &'static str) -> RawContent {
        RawContent::try_from(text).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryBlobStore::new();

        store.create("a", &content("hello")).await.unwrap();

        let bytes = store.get("a").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"hello");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryBlobStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_never_overwrites() {
        let store = InMemoryBlobStore::new();

        store.create("a", &content("first")).await.unwrap();
        let result = store.create("a", &content("second")).await;

        assert!(matches!(result, Err(DomainError::BlobStorage { .. })));
        assert_eq!(&store.get("a").await.unwrap().unwrap()[..], b"first");
    }

    #[tokio::test]
    async fn test_delete_twice_fails() {
        let store = InMemoryBlobStore::new();

        store.create("a", &content("x")).await.unwrap();
        store.delete("a").await.unwrap();

        let result = store.delete("a").await;
        assert!(matches!(result, Err(DomainError::BlobStorage { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_backend_blocking_roundtrip() {
        let store = InMemoryBlobStore::new();
        assert_eq!(store.backend(), "in_memory");

        tokio_test::assert_ok!(tokio_test::block_on(store.create("b", &content("blocking"))));
        tokio_test::assert_err!(tokio_test::block_on(store.create("b", &content("again"))));

        let bytes = tokio_test::block_on(store.get("b")).unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"blocking"[..]));
    }
}
