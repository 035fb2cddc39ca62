//! Subtitle API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::subtitle::FileContext;

/// Stored subtitle metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleResponse {
    pub id: String,
    pub name: String,
    pub content_size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&FileContext> for SubtitleResponse {
    fn from(context: &FileContext) -> Self {
        Self {
            id: context.id().to_string(),
            name: context.name().to_string(),
            content_size: context.content_size(),
            created_at: context.created_at(),
            updated_at: context.updated_at(),
        }
    }
}

/// List of stored subtitles, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleListResponse {
    pub subtitles: Vec<SubtitleResponse>,
    pub total: usize,
}

impl From<&[FileContext]> for SubtitleListResponse {
    fn from(contexts: &[FileContext]) -> Self {
        let subtitles: Vec<SubtitleResponse> = contexts.iter().map(Into::into).collect();

        Self {
            total: subtitles.len(),
            subtitles,
        }
    }
}

/// Body of a rename request
#[derive(Debug, Clone, Deserialize)]
pub struct RenameSubtitleRequest {
    pub name: String,
}
