//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends keyed by strings
    fn as_str(&self) -> &str;
}

/// Trait for metadata types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subtitle::FileContext;

    #[test]
    fn test_file_context_is_keyed_by_its_id() {
        let ctx = FileContext::create("movie.srt").unwrap();
        assert_eq!(ctx.key().as_str(), ctx.id().to_string());
    }
}
