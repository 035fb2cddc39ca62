//! Conversion strategy traits

use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::content::RawContent;
use crate::domain::outcome::{ErrorCode, Outcome};
use crate::domain::subtitle::{PostConversionOption, SubtitleFormat};
use crate::domain::DomainError;

/// Failures raised inside a strategy before they reach an outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The input cannot be transformed at all (empty, unreadable, wrong encoding)
    #[error("Content is not convertible: {0}")]
    NotConvertible(String),

    /// Anything the strategy did not anticipate
    #[error("{0}")]
    Unexpected(String),
}

impl ConversionError {
    pub fn not_convertible(message: impl Into<String>) -> Self {
        Self::NotConvertible(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

impl<T> From<ConversionError> for Outcome<T> {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::NotConvertible(message) => DomainError::unprocessable(message).into(),
            ConversionError::Unexpected(message) => {
                Outcome::failure(ErrorCode::UnknownError, message)
            }
        }
    }
}

/// Strips all formatting of one subtitle format, leaving plain text
#[cfg_attr(test, automock)]
pub trait FormatConverter: Send + Sync {
    /// The format this converter handles
    fn format(&self) -> SubtitleFormat;

    /// Convert the content; never returns empty content as a success
    fn convert(&self, content: &RawContent) -> Outcome<RawContent>;
}

/// One named transformation applied after primary conversion
#[cfg_attr(test, automock)]
pub trait PostConverter: Send + Sync {
    /// The option this converter answers to
    fn option(&self) -> PostConversionOption;

    /// Transform the content
    fn convert(&self, content: &RawContent) -> Outcome<RawContent>;
}

/// Deletes structural markup of one tag family from raw bytes.
///
/// Fails fast with `NotConvertible` instead of building an outcome.
#[cfg_attr(test, automock)]
pub trait TagRemover: Send + Sync {
    fn remove_tags(&self, content: &[u8]) -> Result<RawContent, ConversionError>;
}

/// Run a byte transformation over fully buffered content and wrap the result.
///
/// Shared by every converter so the empty-result and error mapping rules live
/// in one place: empty output is `UnprocessableContent`, `NotConvertible` is
/// `UnprocessableContent`, anything else is `UnknownError` with its message.
pub fn convert_buffered<F>(content: &RawContent, transform: F) -> Outcome<RawContent>
where
    F: FnOnce(&[u8]) -> Result<Vec<u8>, ConversionError>,
{
    let output = match transform(content.as_bytes()) {
        Ok(output) => output,
        Err(err) => return err.into(),
    };

    if output.is_empty() {
        return DomainError::unprocessable("Conversion produced no content").into();
    }

    match RawContent::new(output) {
        Ok(converted) => Outcome::success(converted),
        Err(err) => Outcome::failure(ErrorCode::UnknownError, err.message()),
    }
}
