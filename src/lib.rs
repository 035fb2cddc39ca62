//! Subtitle Cleaner
//!
//! Strips subtitle markup down to plain dialogue text:
//! - Format conversion for SubRip, ASS/SSA, WebVTT, SubViewer and MicroDVD
//! - Chained post-conversion options (tag deletion, single-line output)
//! - Stored subtitles with metadata and content kept apart

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::storage::BlobStore;
use domain::subtitle::FileContext;
use domain::DomainError;
use infrastructure::conversion::ConverterFactory;
use infrastructure::services::SubtitleService;
use infrastructure::storage::{StorageConfig, StorageFactory};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config =
        StorageConfig::from_backend(&config.storage.backend, config.storage.root.clone())?;
    let blob_store = StorageFactory::create_blob_store(&storage_config).await?;

    info!(
        backend = blob_store.backend(),
        max_upload_bytes = config.upload.max_size_bytes,
        "Blob store ready"
    );

    Ok(create_app_state_with_blob_store(blob_store)?
        .with_max_upload_bytes(config.upload.max_size_bytes))
}

/// Create the application state around an existing blob store
pub fn create_app_state_with_blob_store(
    blob_store: Arc<dyn BlobStore>,
) -> Result<AppState, DomainError> {
    let service = create_subtitle_service(blob_store.clone())?;

    Ok(AppState::new(Arc::new(service), blob_store))
}

/// Wire the processors and metadata storage into a subtitle service
pub fn create_subtitle_service(
    blob_store: Arc<dyn BlobStore>,
) -> Result<SubtitleService, DomainError> {
    Ok(SubtitleService::new(
        ConverterFactory::create_conversion_processor()?,
        ConverterFactory::create_post_conversion_processor()?,
        StorageFactory::create_metadata_storage::<FileContext>(),
        blob_store,
    ))
}
