//! Domain layer - Core types, invariants and strategy contracts

pub mod content;
pub mod conversion;
pub mod error;
pub mod outcome;
pub mod storage;
pub mod subtitle;

pub use content::RawContent;
pub use conversion::{
    ConversionError, ConversionProcessor, FormatConverter, PostConversionProcessor,
    PostConverter, TagRemover,
};
pub use error::DomainError;
pub use outcome::{ErrorCode, Outcome, OutcomeError};
pub use storage::{BlobStore, Storage, StorageEntity, StorageKey};
pub use subtitle::{FileContext, FileContextId, PostConversionOption, SubtitleFormat};
