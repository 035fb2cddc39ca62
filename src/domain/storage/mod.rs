//! Storage domain - metadata storage and blob store abstractions

mod blob;
mod entity;
mod repository;

pub use blob::BlobStore;
pub use entity::{StorageEntity, StorageKey};
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
