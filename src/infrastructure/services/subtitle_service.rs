//! Subtitle service - conversion pipeline and stored subtitle lifecycle

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::domain::content::RawContent;
use crate::domain::conversion::{ConversionProcessor, PostConversionProcessor};
use crate::domain::outcome::Outcome;
use crate::domain::storage::{BlobStore, Storage};
use crate::domain::subtitle::{FileContext, FileContextId, PostConversionOption, SubtitleFormat};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_conversion;

/// Request to convert and store a subtitle file
#[derive(Debug, Clone)]
pub struct UploadSubtitleRequest {
    pub name: String,
    pub format: SubtitleFormat,
    pub options: Vec<PostConversionOption>,
    pub content: RawContent,
}

/// Stored metadata together with its content
#[derive(Debug, Clone)]
pub struct SubtitleDownload {
    pub context: FileContext,
    pub content: RawContent,
}

/// Trait for subtitle service (for dynamic dispatch in AppState)
#[async_trait]
pub trait SubtitleServiceTrait: Send + Sync + Debug {
    /// Strip all formatting of `format` from the content
    fn convert(&self, content: &RawContent, format: SubtitleFormat) -> Outcome<RawContent>;

    /// Apply post-conversion options in order
    fn post_convert(
        &self,
        content: RawContent,
        options: &[PostConversionOption],
    ) -> Outcome<RawContent>;

    /// Convert, post-convert and store a new subtitle
    async fn upload(&self, request: UploadSubtitleRequest) -> Outcome<FileContext>;

    /// Stored metadata without content
    async fn get(&self, id: &str) -> Outcome<FileContext>;

    /// Stored metadata with its content
    async fn download(&self, id: &str) -> Outcome<SubtitleDownload>;

    /// Rename a stored subtitle
    async fn rename(&self, id: &str, name: &str) -> Outcome<FileContext>;

    /// Delete a stored subtitle and its content
    async fn delete(&self, id: &str) -> Outcome<()>;

    /// All stored metadata, newest first
    async fn list(&self) -> Outcome<Vec<FileContext>>;
}

/// Subtitle service implementation
#[derive(Debug)]
pub struct SubtitleService {
    conversion: Arc<ConversionProcessor>,
    post_conversion: Arc<PostConversionProcessor>,
    metadata: Arc<dyn Storage<FileContext>>,
    blob_store: Arc<dyn BlobStore>,
}

impl SubtitleService {
    pub fn new(
        conversion: Arc<ConversionProcessor>,
        post_conversion: Arc<PostConversionProcessor>,
        metadata: Arc<dyn Storage<FileContext>>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            conversion,
            post_conversion,
            metadata,
            blob_store,
        }
    }

    fn parse_id(&self, id: &str) -> Result<FileContextId, DomainError> {
        FileContextId::new(id)
    }

    async fn get_required(&self, id: &str) -> Result<FileContext, DomainError> {
        let context_id = self.parse_id(id)?;

        self.metadata
            .get(&context_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Subtitle '{}' not found", id)))
    }

    /// Blob first, then metadata; a failed metadata write removes the blob again
    async fn store(&self, name: String, content: RawContent) -> Result<FileContext, DomainError> {
        let mut context = FileContext::create(name)?;
        context.attach_content(content)?;

        let (metadata, content) = context.take_content();
        let content = content
            .ok_or_else(|| DomainError::internal("Attached content disappeared before storing"))?;
        let key = metadata.id().to_string();

        self.blob_store.create(&key, &content).await?;

        match self.metadata.create(metadata).await {
            Ok(stored) => Ok(stored),
            Err(err) => {
                if let Err(cleanup) = self.blob_store.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned blob");
                }
                Err(err)
            }
        }
    }

    async fn load_content(&self, id: &str) -> Result<SubtitleDownload, DomainError> {
        let context = self.get_required(id).await?;

        let bytes = self
            .blob_store
            .get(context.id().as_str())
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Content for subtitle '{}' not found", id))
            })?;

        Ok(SubtitleDownload {
            context,
            content: RawContent::new(bytes)?,
        })
    }

    async fn rename_stored(&self, id: &str, name: &str) -> Result<FileContext, DomainError> {
        let mut context = self.get_required(id).await?;
        context.rename(name)?;

        self.metadata.update(context).await
    }

    /// Metadata first, then the blob; a blob that cannot be removed is only logged
    async fn delete_stored(&self, id: &str) -> Result<(), DomainError> {
        let context = self.get_required(id).await?;

        self.metadata.delete(context.id()).await?;

        let key = context.id().as_str();
        if let Err(err) = self.blob_store.delete(key).await {
            warn!(key = %key, error = %err, "Failed to remove blob of deleted subtitle");
        }

        Ok(())
    }

    async fn list_stored(&self) -> Result<Vec<FileContext>, DomainError> {
        let mut contexts = self.metadata.list().await?;
        contexts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(contexts)
    }
}

#[async_trait]
impl SubtitleServiceTrait for SubtitleService {
    #[instrument(skip(self, content), fields(format = %format, size = content.len()))]
    fn convert(&self, content: &RawContent, format: SubtitleFormat) -> Outcome<RawContent> {
        let start = Instant::now();
        let outcome = self.conversion.process(content, format);

        record_conversion(
            "format",
            &format.to_string(),
            !outcome.is_error(),
            start.elapsed(),
        );

        if outcome.is_error() {
            debug!(errors = ?outcome.errors(), "Conversion failed");
        }

        outcome
    }

    #[instrument(skip(self, content), fields(size = content.len()))]
    fn post_convert(
        &self,
        content: RawContent,
        options: &[PostConversionOption],
    ) -> Outcome<RawContent> {
        let start = Instant::now();
        let outcome = self.post_conversion.process(content, options);

        let kind = options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        record_conversion("post", &kind, !outcome.is_error(), start.elapsed());

        outcome
    }

    #[instrument(skip(self, request), fields(name = %request.name, format = %request.format))]
    async fn upload(&self, request: UploadSubtitleRequest) -> Outcome<FileContext> {
        let converted = match self
            .convert(&request.content, request.format)
            .into_result()
        {
            Ok(converted) => converted,
            Err(errors) => return Outcome::from_errors(errors),
        };

        let processed = match self.post_convert(converted, &request.options).into_result() {
            Ok(processed) => processed,
            Err(errors) => return Outcome::from_errors(errors),
        };

        let outcome: Outcome<FileContext> = self.store(request.name, processed).await.into();

        if let Some(stored) = outcome.payload() {
            info!(id = %stored.id(), size = stored.content_size(), "Subtitle stored");
        }

        outcome
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Outcome<FileContext> {
        self.get_required(id).await.into()
    }

    #[instrument(skip(self))]
    async fn download(&self, id: &str) -> Outcome<SubtitleDownload> {
        self.load_content(id).await.into()
    }

    #[instrument(skip(self))]
    async fn rename(&self, id: &str, name: &str) -> Outcome<FileContext> {
        self.rename_stored(id, name).await.into()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Outcome<()> {
        let outcome: Outcome<()> = self.delete_stored(id).await.into();

        if !outcome.is_error() {
            info!(id = %id, "Subtitle deleted");
        }

        outcome
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Outcome<Vec<FileContext>> {
        self.list_stored().await.into()
    }
}
