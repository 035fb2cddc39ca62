//! Blob store contract for raw subtitle content

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::content::RawContent;
use crate::domain::DomainError;

/// Key/value store for raw content bytes.
///
/// Implementations own the serialization of `create` and `delete` on the same
/// key; callers rely on `create` never overwriting and `delete` never
/// succeeding twice.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    /// Fetch the bytes stored at `path`; absence is `Ok(None)`
    async fn get(&self, path: &str) -> Result<Option<Bytes>, DomainError>;

    /// Store content at `path`; fails with a blob storage error if the path is taken
    async fn create(&self, path: &str, content: &RawContent) -> Result<(), DomainError>;

    /// Remove the content at `path`; fails with a blob storage error if nothing is there
    async fn delete(&self, path: &str) -> Result<(), DomainError>;

    /// Short backend name for logs and health checks
    fn backend(&self) -> &'static str;
}
