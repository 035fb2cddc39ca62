//! In-memory metadata storage

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory metadata storage
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_str().to_string(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

fn lock_error(kind: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire {} lock: {}", kind, e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(|e| lock_error("write", e))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(|e| lock_error("write", e))?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(|e| lock_error("write", e))?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(|e| lock_error("read", e))?;

        Ok(entities.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subtitle::{FileContext, FileContextId};

    fn context(name: &str) -> FileContext {
        FileContext::create(name).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();
        let ctx = context("movie.srt");

        storage.create(ctx.clone()).await.unwrap();

        let result = storage.get(ctx.id()).await.unwrap().unwrap();
        assert_eq!(result.id(), ctx.id());
        assert_eq!(result.name(), "movie.srt");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();
        let ctx = context("movie.srt");

        storage.create(ctx.clone()).await.unwrap();
        let result = storage.create(ctx).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();
        let mut ctx = context("movie.srt");

        storage.create(ctx.clone()).await.unwrap();

        ctx.rename("renamed.srt").unwrap();
        storage.update(ctx.clone()).await.unwrap();

        let result = storage.get(ctx.id()).await.unwrap();
        assert_eq!(result.unwrap().name(), "renamed.srt");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();

        let result = storage.update(context("movie.srt")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();
        let ctx = context("movie.srt");

        storage.create(ctx.clone()).await.unwrap();

        assert!(storage.delete(ctx.id()).await.unwrap());
        assert!(!storage.exists(ctx.id()).await.unwrap());
        assert!(!storage.delete(ctx.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();

        let result = storage.get(&FileContextId::generate()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let storage: InMemoryStorage<FileContext> = InMemoryStorage::new();

        storage.create(context("a.srt")).await.unwrap();
        storage.create(context("b.ass")).await.unwrap();
        storage.create(context("c.vtt")).await.unwrap();

        assert_eq!(storage.list().await.unwrap().len(), 3);
        assert_eq!(storage.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_with_entities() {
        let storage = InMemoryStorage::with_entities(vec![context("a.srt"), context("b.srt")]);

        assert_eq!(storage.count().await.unwrap(), 2);
    }
}
