//! API error body built from outcome errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::outcome::{ErrorCode, Outcome, OutcomeError};
use crate::domain::DomainError;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub errors: Vec<ApiErrorDetail>,
}

/// One reported error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

/// HTTP status for an error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::UnprocessableContent => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl ApiError {
    /// Build an error from outcome errors; the first one picks the status
    pub fn from_errors(errors: impl IntoIterator<Item = OutcomeError>) -> Self {
        let mut details: Vec<ApiErrorDetail> = errors
            .into_iter()
            .map(|e| ApiErrorDetail {
                code: e.code,
                message: e.message,
            })
            .collect();

        if details.is_empty() {
            details.push(ApiErrorDetail {
                code: ErrorCode::UnknownError,
                message: "Request failed without reporting an error".to_string(),
            });
        }

        let status = status_for(details[0].code);

        Self {
            status,
            response: ApiErrorResponse {
                status: status.as_u16(),
                timestamp: Utc::now(),
                errors: details,
            },
        }
    }

    /// Single error with the given code
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::from_errors([OutcomeError::new(code, message)])
    }

    /// Malformed request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// First error code in the body
    pub fn code(&self) -> ErrorCode {
        self.response.errors[0].code
    }
}

/// Unwrap a successful outcome or turn its errors into an API error
pub fn into_api_result<T>(outcome: Outcome<T>) -> Result<T, ApiError> {
    outcome.into_result().map_err(ApiError::from_errors)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_errors([OutcomeError::from(err)])
    }
}

impl From<Vec<OutcomeError>> for ApiError {
    fn from(errors: Vec<OutcomeError>) -> Self {
        Self::from_errors(errors)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let first = &self.response.errors[0];
        write!(f, "{}: {}", first.code, first.message)
    }
}

impl std::error::Error for ApiError {}
