//! Application state for shared services

use std::sync::Arc;

use crate::domain::storage::BlobStore;
use crate::infrastructure::services::SubtitleServiceTrait;

/// Default upload limit (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub subtitle_service: Arc<dyn SubtitleServiceTrait>,
    pub blob_store: Arc<dyn BlobStore>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        subtitle_service: Arc<dyn SubtitleServiceTrait>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            subtitle_service,
            blob_store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
