//! Storage infrastructure - Metadata storage and blob store implementations

mod factory;
mod filesystem;
mod in_memory;
mod in_memory_blob;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use filesystem::FileSystemBlobStore;
pub use in_memory::InMemoryStorage;
pub use in_memory_blob::InMemoryBlobStore;
