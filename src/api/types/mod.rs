//! API request and response types

pub mod error;
pub mod json;
pub mod subtitle;

pub use error::{into_api_result, status_for, ApiError, ApiErrorDetail, ApiErrorResponse};
pub use json::Json;
pub use subtitle::{RenameSubtitleRequest, SubtitleListResponse, SubtitleResponse};
