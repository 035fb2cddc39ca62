//! Subtitle endpoints

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    into_api_result, ApiError, Json, RenameSubtitleRequest, SubtitleListResponse,
    SubtitleResponse,
};
use crate::domain::content::RawContent;
use crate::domain::subtitle::{PostConversionOption, SubtitleFormat};
use crate::infrastructure::services::UploadSubtitleRequest;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Fields collected from a subtitle multipart form
#[derive(Debug, Default)]
struct SubtitleForm {
    file: Option<Bytes>,
    file_name: Option<String>,
    format: Option<String>,
    options: Vec<String>,
    name: Option<String>,
}

impl SubtitleForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
        {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "file" => {
                    form.file_name = field.file_name().map(|s| s.to_string());
                    form.file = Some(field.bytes().await.map_err(|e| {
                        ApiError::bad_request(format!("Failed to read uploaded file: {}", e))
                    })?);
                }
                "format" | "option" | "options" | "name" => {
                    let value = field.text().await.map_err(|e| {
                        ApiError::bad_request(format!(
                            "Failed to read field '{}': {}",
                            field_name, e
                        ))
                    })?;

                    match field_name.as_str() {
                        "format" => form.format = Some(value),
                        "name" => form.name = Some(value),
                        _ => form.options.extend(
                            value
                                .split(',')
                                .map(str::trim)
                                .filter(|s| !s.is_empty())
                                .map(str::to_string),
                        ),
                    }
                }
                other => debug!(field = %other, "Ignoring unknown multipart field"),
            }
        }

        Ok(form)
    }

    fn content(&mut self) -> Result<RawContent, ApiError> {
        let bytes = self
            .file
            .take()
            .ok_or_else(|| ApiError::bad_request("Missing multipart field 'file'"))?;

        Ok(RawContent::new(bytes)?)
    }

    /// Explicit `format` field, else the uploaded file's extension
    fn format(&self) -> Result<SubtitleFormat, ApiError> {
        if let Some(format) = &self.format {
            return Ok(format.parse::<SubtitleFormat>()?);
        }

        self.file_name
            .as_deref()
            .and_then(|name| FsPath::new(name).extension())
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ApiError::bad_request("Missing multipart field 'format'"))?
            .parse::<SubtitleFormat>()
            .map_err(ApiError::from)
    }

    fn options(&self) -> Result<Vec<PostConversionOption>, ApiError> {
        self.options
            .iter()
            .map(|option| option.parse::<PostConversionOption>().map_err(ApiError::from))
            .collect()
    }

    fn name(&self, format: SubtitleFormat) -> String {
        self.name
            .clone()
            .or_else(|| self.file_name.clone())
            .unwrap_or_else(|| format!("subtitle.{}", format.extension()))
    }
}

fn text_response(content: RawContent) -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], content.into_bytes()).into_response()
}

/// POST /api/v1/subtitles/convert
/// Strip formatting and return the plain text
pub async fn convert_subtitle(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = SubtitleForm::read(multipart).await?;
    let format = form.format()?;
    let content = form.content()?;

    debug!(format = %format, size = content.len(), "Converting subtitle");

    let converted = into_api_result(state.subtitle_service.convert(&content, format))?;

    Ok(text_response(converted))
}

/// POST /api/v1/subtitles/post-convert
/// Apply post-conversion options in the order given
pub async fn post_convert_subtitle(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut form = SubtitleForm::read(multipart).await?;
    let options = form.options()?;
    let content = form.content()?;

    debug!(options = ?options, size = content.len(), "Post-converting subtitle");

    let converted = into_api_result(state.subtitle_service.post_convert(content, &options))?;

    Ok(text_response(converted))
}

/// POST /api/v1/subtitles
/// Convert, post-convert and store a subtitle
pub async fn upload_subtitle(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubtitleResponse>), ApiError> {
    let mut form = SubtitleForm::read(multipart).await?;
    let format = form.format()?;
    let options = form.options()?;
    let name = form.name(format);
    let content = form.content()?;

    let request = UploadSubtitleRequest {
        name,
        format,
        options,
        content,
    };

    let stored = into_api_result(state.subtitle_service.upload(request).await)?;

    Ok((StatusCode::CREATED, Json(SubtitleResponse::from(&stored))))
}

/// GET /api/v1/subtitles
pub async fn list_subtitles(
    State(state): State<AppState>,
) -> Result<Json<SubtitleListResponse>, ApiError> {
    let contexts = into_api_result(state.subtitle_service.list().await)?;

    Ok(Json(SubtitleListResponse::from(contexts.as_slice())))
}

/// GET /api/v1/subtitles/{id}
pub async fn get_subtitle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubtitleResponse>, ApiError> {
    let context = into_api_result(state.subtitle_service.get(&id).await)?;

    Ok(Json(SubtitleResponse::from(&context)))
}

/// GET /api/v1/subtitles/{id}/content
/// Download the stored plain text
pub async fn download_subtitle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let download = into_api_result(state.subtitle_service.download(&id).await)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download
            .context
            .name()
            .replace(['"', '\\', '\r', '\n'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, TEXT_PLAIN.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.content.into_bytes(),
    )
        .into_response())
}

/// PATCH /api/v1/subtitles/{id}
pub async fn rename_subtitle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RenameSubtitleRequest>,
) -> Result<Json<SubtitleResponse>, ApiError> {
    let context = into_api_result(state.subtitle_service.rename(&id, &request.name).await)?;

    Ok(Json(SubtitleResponse::from(&context)))
}

/// DELETE /api/v1/subtitles/{id}
pub async fn delete_subtitle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    into_api_result(state.subtitle_service.delete(&id).await)?;

    Ok(StatusCode::NO_CONTENT)
}
